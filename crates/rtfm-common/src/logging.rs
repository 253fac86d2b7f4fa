//! Structured logging infrastructure for RTFM Bot

use crate::error::{Result, RtfmError};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-line output
    Pretty,
    /// Single-line output
    #[default]
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "rtfm_bot=debug,serenity=warn")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output; stdout when unset
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file_path: None,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Build the env filter, preferring `RUST_LOG` when it is set.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Fails if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let init_result = match (&config.file_path, config.format) {
        (Some(path), format) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(config.include_targets)
                .with_writer(std::sync::Mutex::new(file));
            match format {
                LogFormat::Json => registry.with(layer.json()).try_init(),
                LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
                LogFormat::Compact => registry.with(layer.compact()).try_init(),
            }
        }
        (None, LogFormat::Json) => registry
            .with(fmt::layer().json().with_target(config.include_targets))
            .try_init(),
        (None, LogFormat::Pretty) => registry
            .with(fmt::layer().pretty().with_target(config.include_targets))
            .try_init(),
        (None, LogFormat::Compact) => registry
            .with(fmt::layer().compact().with_target(config.include_targets))
            .try_init(),
    };

    init_result.map_err(|e| RtfmError::config_with_source("Failed to install logger", e))
}
