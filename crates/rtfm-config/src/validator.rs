//! Runtime validation of loaded configuration.

use crate::schema::Config;
use rtfm_common::{Result, RtfmError};
use tracing::warn;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// The Discord token is deliberately not checked here: a missing token
    /// surfaces as an authentication failure when the gateway connects.
    pub fn validate(config: &Config) -> Result<()> {
        if config.database.path.as_os_str().is_empty() {
            return Err(RtfmError::validation_field(
                "database path cannot be empty",
                "database.path",
            ));
        }

        if config.plugins.directory.as_os_str().is_empty() {
            return Err(RtfmError::validation_field(
                "plugin directory cannot be empty",
                "plugins.directory",
            ));
        }

        if config.http.request_timeout_seconds == 0 {
            return Err(RtfmError::validation_field(
                "request timeout must be at least one second",
                "http.request_timeout_seconds",
            ));
        }

        if config.database.connect_timeout_seconds == 0 {
            return Err(RtfmError::validation_field(
                "connect timeout must be at least one second",
                "database.connect_timeout_seconds",
            ));
        }

        if config.discord.token.is_empty() {
            warn!("No Discord token configured; login will fail at connect time");
        }

        Ok(())
    }
}
