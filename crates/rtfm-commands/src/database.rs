//! SQLite connection holding the `RTFM_DICTIONARY` library table.
//!
//! The bot only reads from the database; the table is maintained elsewhere.

use rtfm_common::{LibraryRegistry, Result, RtfmError};
use rtfm_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, info};

/// Query materialising the whole library registry.
pub const LIBRARY_QUERY: &str = "SELECT * FROM RTFM_DICTIONARY";

/// Handle to the bot's single database connection.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects to the SQLite file, creating it when missing.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database at {}", config.path.display());

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                RtfmError::database_with_source(
                    format!("Failed to connect to database {}", config.path.display()),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Reads the complete library table in one query.
    ///
    /// Rows are `(name, link)`; an empty table yields an empty registry.
    pub async fn fetch_libraries(&self) -> Result<LibraryRegistry> {
        let rows = sqlx::query(LIBRARY_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RtfmError::database_with_source("Failed to read RTFM_DICTIONARY", e))?;

        let entries = rows
            .iter()
            .map(|row| -> std::result::Result<(String, String), sqlx::Error> {
                Ok((row.try_get(0)?, row.try_get(1)?))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RtfmError::database_with_source("Malformed RTFM_DICTIONARY row", e))?;

        let registry: LibraryRegistry = entries.into_iter().collect();
        debug!("Loaded {} from RTFM_DICTIONARY", registry);
        Ok(registry)
    }

    /// Whether the connection has been closed.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Closes the connection. Returns `true` only for the call that closed it.
    pub async fn close(&self) -> bool {
        if self.pool.is_closed() {
            return false;
        }
        self.pool.close().await;
        debug!("Database connection closed");
        true
    }
}
