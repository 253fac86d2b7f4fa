//! Plugin manifest definition

use super::PluginError;
use serde::Deserialize;
use std::path::Path;

/// One manifest file in the plugin directory.
///
/// ```toml
/// name = "rtfm"
/// enabled = true
/// description = "Documentation lookups"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginManifest {
    /// Catalog name of the plugin to load.
    pub name: String,

    /// Disabled manifests are skipped without error.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Free-form note for operators.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl PluginManifest {
    /// Reads and parses a manifest file.
    pub fn from_file(path: &Path) -> Result<Self, PluginError> {
        let content = std::fs::read_to_string(path).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| PluginError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtfm_common::test_utils::{create_temp_dir, write_manifest};

    #[test]
    fn test_minimal_manifest() {
        let dir = create_temp_dir();
        let path = write_manifest(dir.path(), "meta.toml", "name = \"meta\"\n");

        let manifest = PluginManifest::from_file(&path).unwrap();
        assert_eq!(manifest.name, "meta");
        assert!(manifest.enabled);
        assert!(manifest.description.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = create_temp_dir();
        let path = write_manifest(dir.path(), "meta.toml", "name = \"meta\"\nversion = 2\n");

        let err = PluginManifest::from_file(&path).unwrap_err();
        assert!(matches!(err, PluginError::Manifest { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = create_temp_dir();
        let err = PluginManifest::from_file(&dir.path().join("gone.toml")).unwrap_err();
        assert!(matches!(err, PluginError::Io { .. }));
    }
}
