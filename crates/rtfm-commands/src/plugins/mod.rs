//! Plugin ("cog") system.
//!
//! Plugins are compiled into the binary and listed in a [`PluginCatalog`].
//! Which of them run is decided by TOML manifests in the plugin directory;
//! each plugin registers its commands independently, so one broken plugin
//! never prevents the others from loading.

pub mod catalog;
pub mod loader;
pub mod manifest;

pub use catalog::{builtin_catalog, PluginCatalog};
pub use loader::{LoadReport, LoadedPlugins, PluginFailure, PluginLoader};
pub use manifest::PluginManifest;

use crate::framework::Command;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a single plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}")]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying cause.
        source: std::io::Error,
    },

    /// The manifest is not valid TOML or misses required keys.
    #[error("invalid manifest {path}")]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying cause.
        source: toml::de::Error,
    },

    /// The manifest names a plugin that is not in the catalog.
    #[error("no plugin named '{0}' is available")]
    Unknown(String),

    /// Another manifest already loaded this plugin.
    #[error("plugin '{0}' is already loaded")]
    AlreadyLoaded(String),

    /// The plugin's own setup failed.
    #[error("plugin '{plugin}' failed to set up: {message}")]
    Setup {
        /// Plugin name.
        plugin: String,
        /// Reason given by the plugin.
        message: String,
    },

    /// The plugin panicked during setup.
    #[error("plugin '{plugin}' panicked during setup: {message}")]
    Panicked {
        /// Plugin name.
        plugin: String,
        /// Panic payload text.
        message: String,
    },

    /// A command name collides with one registered by an earlier plugin.
    #[error("command '{command}' of plugin '{plugin}' is already registered by '{owner}'")]
    DuplicateCommand {
        /// Plugin being loaded.
        plugin: String,
        /// Colliding command or alias.
        command: String,
        /// Plugin that registered it first.
        owner: String,
    },
}

/// An independently loadable unit registering one or more commands.
pub trait Plugin: Send + Sync {
    /// Unique name, matched against the `name` key of manifests.
    fn name(&self) -> &'static str;

    /// One-line description, shown by `about` unless the manifest gives one.
    fn description(&self) -> &'static str {
        ""
    }

    /// Registers the plugin's commands.
    fn setup(&self, commands: &mut CommandSet) -> Result<(), PluginError>;
}

/// Commands collected from one plugin's setup.
#[derive(Default)]
pub struct CommandSet {
    commands: Vec<Command>,
}

impl CommandSet {
    /// Adds a command.
    pub fn add(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Number of commands collected.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command was added.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Accumulates commands from every successfully loaded plugin.
#[derive(Default)]
pub struct PluginRegistrar {
    commands: Vec<Command>,
    owners: HashMap<String, String>,
}

impl PluginRegistrar {
    /// Creates an empty registrar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a plugin's commands. Either every command is registered or,
    /// on a name collision, none is.
    pub fn register(&mut self, plugin: &str, set: CommandSet) -> Result<usize, PluginError> {
        let mut names = Vec::new();
        for command in &set.commands {
            for name in std::iter::once(&command.name).chain(command.aliases.iter()) {
                let owner = self
                    .owners
                    .get(name)
                    .cloned()
                    .or_else(|| names.contains(name).then(|| plugin.to_string()));
                if let Some(owner) = owner {
                    return Err(PluginError::DuplicateCommand {
                        plugin: plugin.to_string(),
                        command: name.clone(),
                        owner,
                    });
                }
                names.push(name.clone());
            }
        }

        for name in names {
            self.owners.insert(name, plugin.to_string());
        }
        let count = set.commands.len();
        self.commands.extend(set.commands);
        Ok(count)
    }

    /// Whether a command or alias of this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.owners.contains_key(name)
    }

    /// Registered commands, in registration order.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}
