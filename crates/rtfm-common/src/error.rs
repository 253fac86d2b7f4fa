//! Error types and utilities for RTFM Bot

use thiserror::Error;

/// Boxed error source carried by the structured variants.
type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for RTFM Bot operations
pub type Result<T> = std::result::Result<T, RtfmError>;

/// Main error type for RTFM Bot operations
#[derive(Error, Debug)]
pub enum RtfmError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (HTTP session, requests)
    #[error("Network error: {message}")]
    Network {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Database related errors
    #[error("Database error: {message}")]
    Database {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Plugin discovery and registration errors
    #[error("Plugin error: {message}")]
    Plugin {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Resource lifecycle misuse, e.g. initialising twice
    #[error("Lifecycle error: {message}")]
    Lifecycle {
        /// Human readable description.
        message: String,
    },

    /// Validation errors for configuration values or user input
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description.
        message: String,
        /// Offending field, if known.
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Human readable description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },
}

impl RtfmError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new database error with source
    pub fn database_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new plugin error with source
    pub fn plugin_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Plugin {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new lifecycle error
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle {
            message: msg.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

/// Render an error together with its full `source()` chain on one line.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to RtfmError
impl From<reqwest::Error> for RtfmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::network_with_source(format!("HTTP error: {}", status_code), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from serde_yaml::Error to RtfmError
impl From<serde_yaml::Error> for RtfmError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

/// Convert from toml::de::Error to RtfmError
impl From<toml::de::Error> for RtfmError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}
