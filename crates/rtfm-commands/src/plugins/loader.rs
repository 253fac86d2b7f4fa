//! Plugin loader - resolves manifests in the plugin directory against the catalog

use super::{CommandSet, Plugin, PluginCatalog, PluginError, PluginManifest, PluginRegistrar};
use crate::error_sink::panic_message;
use crate::framework::Command;
use rtfm_common::{error_chain, Result, RtfmError};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// A plugin that failed to load, and why.
#[derive(Debug)]
pub struct PluginFailure {
    /// Manifest path or plugin name the failure belongs to.
    pub origin: String,
    /// What went wrong.
    pub error: PluginError,
}

/// Per-plugin outcome of a load pass.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Plugins registered, in load order.
    pub loaded: Vec<String>,
    /// Plugins whose manifest disabled them.
    pub skipped: Vec<String>,
    /// Plugins that failed; each was logged once.
    pub failed: Vec<PluginFailure>,
    /// Description of each loaded plugin that has one.
    pub descriptions: HashMap<String, String>,
}

impl LoadReport {
    /// Description of a loaded plugin: the manifest's if set, else the
    /// plugin's own.
    pub fn description(&self, plugin: &str) -> Option<&str> {
        self.descriptions.get(plugin).map(String::as_str)
    }

    /// Whether every attempted plugin loaded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Commands and report produced by [`PluginLoader::load`].
pub struct LoadedPlugins {
    /// Commands of every loaded plugin.
    pub commands: Vec<Command>,
    /// What happened to each plugin.
    pub report: LoadReport,
}

impl std::fmt::Debug for LoadedPlugins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.commands.iter().map(|c| c.name.as_str()).collect();
        f.debug_struct("LoadedPlugins")
            .field("commands", &names)
            .field("report", &self.report)
            .finish()
    }
}

enum EntryOutcome {
    Loaded {
        name: String,
        description: Option<String>,
    },
    Skipped(String),
}

/// Plugin loader
pub struct PluginLoader {
    directory: PathBuf,
}

impl PluginLoader {
    /// Creates a loader for the given manifest directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The manifest directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether `path` names an eligible manifest: a `.toml` file whose name
    /// does not start with an underscore.
    pub fn is_manifest(path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        !file_name.starts_with('_')
            && path.extension().and_then(|ext| ext.to_str()) == Some("toml")
    }

    /// Lists eligible manifests sorted by file name, or `None` if the
    /// directory does not exist.
    pub fn discover(&self) -> Result<Option<Vec<PathBuf>>> {
        if !self.directory.exists() {
            return Ok(None);
        }

        let entries = std::fs::read_dir(&self.directory).map_err(|e| {
            RtfmError::plugin_with_source(
                format!(
                    "Failed to read plugin directory {}",
                    self.directory.display()
                ),
                e,
            )
        })?;

        let mut manifests = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read plugin directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && Self::is_manifest(&path) {
                manifests.push(path);
            } else {
                debug!("Ignoring {}", path.display());
            }
        }
        manifests.sort();
        Ok(Some(manifests))
    }

    /// Loads every plugin named by the manifest directory.
    ///
    /// A failing plugin is logged and recorded; the others still load. When
    /// the directory does not exist the whole catalog is loaded instead. Only
    /// an unreadable directory is an error.
    pub fn load(&self, catalog: &PluginCatalog) -> Result<LoadedPlugins> {
        let mut registrar = PluginRegistrar::new();
        let mut report = LoadReport::default();

        match self.discover()? {
            Some(manifests) => {
                info!(
                    "Found {} plugin manifest(s) in {}",
                    manifests.len(),
                    self.directory.display()
                );
                for path in manifests {
                    let outcome = self.load_manifest(&path, catalog, &mut registrar, &report);
                    record(&mut report, path.display().to_string(), outcome);
                }
            }
            None => {
                warn!(
                    "Plugin directory {} does not exist; loading all built-in plugins",
                    self.directory.display()
                );
                for plugin in catalog.iter() {
                    let outcome = load_plugin(plugin, None, &mut registrar);
                    record(&mut report, plugin.name().to_string(), outcome);
                }
            }
        }

        info!(
            "Plugins: {} loaded, {} skipped, {} failed",
            report.loaded.len(),
            report.skipped.len(),
            report.failed.len()
        );

        Ok(LoadedPlugins {
            commands: registrar.into_commands(),
            report,
        })
    }

    fn load_manifest(
        &self,
        path: &Path,
        catalog: &PluginCatalog,
        registrar: &mut PluginRegistrar,
        report: &LoadReport,
    ) -> std::result::Result<EntryOutcome, PluginError> {
        let manifest = PluginManifest::from_file(path)?;
        if !manifest.enabled {
            return Ok(EntryOutcome::Skipped(manifest.name));
        }
        if report.loaded.iter().any(|name| *name == manifest.name) {
            return Err(PluginError::AlreadyLoaded(manifest.name));
        }
        let plugin = catalog
            .get(&manifest.name)
            .ok_or_else(|| PluginError::Unknown(manifest.name.clone()))?;
        load_plugin(plugin, manifest.description, registrar)
    }
}

/// Runs one plugin's setup and merges its commands. A panic in setup is
/// turned into [`PluginError::Panicked`] and nothing is registered.
fn load_plugin(
    plugin: &Arc<dyn Plugin>,
    description: Option<String>,
    registrar: &mut PluginRegistrar,
) -> std::result::Result<EntryOutcome, PluginError> {
    let mut commands = CommandSet::default();
    std::panic::catch_unwind(AssertUnwindSafe(|| plugin.setup(&mut commands))).map_err(
        |panic| PluginError::Panicked {
            plugin: plugin.name().to_string(),
            message: panic_message(panic.as_ref()).to_string(),
        },
    )??;
    let count = registrar.register(plugin.name(), commands)?;
    info!("Loaded plugin '{}' ({} command(s))", plugin.name(), count);

    let description = description
        .filter(|text| !text.trim().is_empty())
        .or_else(|| Some(plugin.description().to_string()).filter(|text| !text.is_empty()));
    Ok(EntryOutcome::Loaded {
        name: plugin.name().to_string(),
        description,
    })
}

fn record(
    report: &mut LoadReport,
    origin: String,
    outcome: std::result::Result<EntryOutcome, PluginError>,
) {
    match outcome {
        Ok(EntryOutcome::Loaded { name, description }) => {
            if let Some(description) = description {
                report.descriptions.insert(name.clone(), description);
            }
            report.loaded.push(name);
        }
        Ok(EntryOutcome::Skipped(name)) => {
            info!("Plugin '{}' is disabled, skipping", name);
            report.skipped.push(name);
        }
        Err(err) => {
            error!("Failed to load plugin from {}: {}", origin, error_chain(&err));
            report.failed.push(PluginFailure { origin, error: err });
        }
    }
}
