//! Default values for every configuration section.

use crate::schema::*;
use rtfm_common::LoggingConfig;
use std::path::PathBuf;

/// Default SQLite database file.
pub const DEFAULT_DATABASE_PATH: &str = "bot.db";

/// Default plugin manifest directory.
pub const DEFAULT_PLUGIN_DIRECTORY: &str = "cogs";

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            database: DatabaseConfig::default(),
            http: HttpConfig::default(),
            plugins: PluginsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            connect_timeout_seconds: 30,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("rtfm-bot/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_PLUGIN_DIRECTORY),
        }
    }
}
