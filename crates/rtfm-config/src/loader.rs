//! Configuration loading utilities

use crate::schema::Config;
use crate::validator::ConfigValidator;
use rtfm_common::{Result, RtfmError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable holding the Discord token.
pub const TOKEN_VAR: &str = "TOKEN";

/// Alternative token variable accepted when `TOKEN` is unset.
pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";

/// Environment variable pointing at a YAML configuration file.
pub const CONFIG_PATH_VAR: &str = "RTFM_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Offending variable.
        var: String,
        /// Underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for RtfmError {
    fn from(err: ConfigError) -> Self {
        RtfmError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `.env` from the working directory (or a parent) if one exists.
    ///
    /// Returns the path that was loaded.
    pub fn load_dotenv() -> Option<PathBuf> {
        match dotenvy::dotenv() {
            Ok(path) => {
                debug!("Loaded environment from {}", path.display());
                Some(path)
            }
            Err(_) => None,
        }
    }

    /// Finds the configuration file to use: `explicit` if given, then
    /// `RTFM_CONFIG_PATH`, then `config.yaml`/`config.yml` when present.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        ["config.yaml", "config.yml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Reads `path` (or starts from defaults when `None`) and applies
    /// environment overrides. The result is not validated, so this can run
    /// before logging is installed without losing validation warnings.
    pub fn read(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => Config::default(),
        };
        Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
        Ok(config)
    }

    /// Load configuration using the default lookup order, apply environment
    /// overrides and validate the result.
    pub fn load() -> Result<Config> {
        let path = Self::locate(None);
        if path.is_none() {
            info!("No configuration file found, using defaults");
        }
        let config = Self::read(path.as_deref())?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, then apply environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let config = Self::read(Some(path.as_ref()))?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Parse a YAML configuration document without consulting the environment.
    pub fn from_yaml_str(content: &str) -> Result<Config> {
        let config: Config = serde_yaml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Config> {
        debug!("Reading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply overrides from a variable lookup function onto `config`.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> std::result::Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_VAR).or_else(|| lookup(DISCORD_TOKEN_VAR)) {
            config.discord.token = token;
        }

        if let Some(path) = lookup("RTFM_DATABASE_PATH") {
            config.database.path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("RTFM_PLUGIN_DIR") {
            config.plugins.directory = PathBuf::from(dir);
        }

        if let Some(level) = lookup("RTFM_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(timeout) = lookup("RTFM_HTTP_TIMEOUT") {
            config.http.request_timeout_seconds =
                timeout.trim().parse().map_err(|e| ConfigError::EnvParse {
                    var: "RTFM_HTTP_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_token_override() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides(&mut config, lookup(&[("TOKEN", "abc")])).unwrap();
        assert_eq!(config.discord.token, "abc");
    }

    #[test]
    fn test_token_prefers_token_over_discord_token() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides(
            &mut config,
            lookup(&[("TOKEN", "primary"), ("DISCORD_TOKEN", "fallback")]),
        )
        .unwrap();
        assert_eq!(config.discord.token, "primary");

        let mut config = Config::default();
        ConfigLoader::apply_overrides(&mut config, lookup(&[("DISCORD_TOKEN", "fallback")]))
            .unwrap();
        assert_eq!(config.discord.token, "fallback");
    }

    #[test]
    fn test_path_and_level_overrides() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides(
            &mut config,
            lookup(&[
                ("RTFM_DATABASE_PATH", "/tmp/rtfm.db"),
                ("RTFM_PLUGIN_DIR", "/srv/cogs"),
                ("RTFM_LOG_LEVEL", "debug"),
                ("RTFM_HTTP_TIMEOUT", " 5 "),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/rtfm.db"));
        assert_eq!(config.plugins.directory, PathBuf::from("/srv/cogs"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.http.request_timeout_seconds, 5);
    }

    #[test]
    fn test_invalid_timeout_override() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides(
            &mut config,
            lookup(&[("RTFM_HTTP_TIMEOUT", "soon")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("RTFM_HTTP_TIMEOUT"));
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let explicit = Path::new("/etc/rtfm/bot.yaml");
        assert_eq!(ConfigLoader::locate(Some(explicit)), Some(explicit.to_path_buf()));
    }

    #[test]
    fn test_read_does_not_validate() {
        let dir = rtfm_common::test_utils::create_temp_dir();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "http:\n  request_timeout_seconds: 0\n").unwrap();

        let config = ConfigLoader::read(Some(&path)).unwrap();
        assert_eq!(config.http.request_timeout_seconds, 0);
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ConfigLoader::from_yaml_str("database:\n  path: data/rtfm.db\n").unwrap();
        assert_eq!(config.database.path, PathBuf::from("data/rtfm.db"));
        assert_eq!(config.database.connect_timeout_seconds, 30);
        assert_eq!(config.plugins.directory, PathBuf::from("cogs"));
    }
}
