//! Ordered acquisition and idempotent release of shared resources.

use crate::error::BotResult;
use poise::serenity_prelude as serenity;
use rtfm_commands::{BotState, Database, HttpSession, LoadedPlugins, PluginCatalog, PluginLoader};
use rtfm_common::RtfmError;
use rtfm_config::Config;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

/// What a [`ResourceLifecycle::teardown`] call actually released.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TeardownReport {
    /// The HTTP session was open and is now closed.
    pub session_closed: bool,
    /// The database was open and is now closed.
    pub database_closed: bool,
    /// Gateway shards were asked to shut down.
    pub shards_stopped: bool,
}

/// Owns startup and shutdown ordering of the shared [`BotState`].
pub struct ResourceLifecycle {
    config: Arc<Config>,
    state: Arc<BotState>,
    shard_manager: OnceCell<Arc<serenity::ShardManager>>,
    shards_stopped: AtomicBool,
    teardown_lock: Mutex<()>,
}

impl ResourceLifecycle {
    /// Creates a lifecycle around an empty state.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            state: Arc::new(BotState::new()),
            shard_manager: OnceCell::new(),
            shards_stopped: AtomicBool::new(false),
            teardown_lock: Mutex::new(()),
        }
    }

    /// The shared state populated by [`init`](Self::init).
    pub fn state(&self) -> &Arc<BotState> {
        &self.state
    }

    /// Attaches the gateway shard manager so teardown can stop it.
    pub fn attach_shard_manager(&self, shard_manager: Arc<serenity::ShardManager>) {
        if self.shard_manager.set(shard_manager).is_err() {
            debug!("Shard manager already attached");
        }
    }

    /// Acquires every shared resource, in order:
    ///
    /// 1. plugins (individual failures are logged, not returned)
    /// 2. the HTTP session
    /// 3. the database, then the library registry read from it
    /// 4. the scraper, built on the session from step 2
    ///
    /// Errors from steps 2-4 propagate. Whatever was acquired before the
    /// failure stays in the state so [`teardown`](Self::teardown) can release it.
    pub async fn init(&self, catalog: &PluginCatalog) -> BotResult<LoadedPlugins> {
        if self.state.session().is_some() {
            return Err(RtfmError::lifecycle("resources already initialised").into());
        }

        let plugins = PluginLoader::new(&self.config.plugins.directory).load(catalog)?;

        self.state.set_session(HttpSession::open(&self.config.http)?)?;

        let database = self
            .state
            .set_database(Database::connect(&self.config.database).await?)?;
        let libraries = database.fetch_libraries().await?;
        info!("Library registry loaded: {}", libraries);
        self.state.set_libraries(libraries)?;

        self.state.install_scraper()?;

        info!("Startup complete");
        Ok(plugins)
    }

    /// Releases resources in reverse order. Every step checks state first, so
    /// this is safe after a partial [`init`](Self::init) and when called
    /// more than once.
    pub async fn teardown(&self) -> TeardownReport {
        let _guard = self.teardown_lock.lock().await;
        let mut report = TeardownReport::default();

        if let Some(session) = self.state.session() {
            if !session.is_closed() {
                report.session_closed = session.close();
            }
        }

        if let Some(database) = self.state.database() {
            report.database_closed = database.close().await;
        }

        if let Some(shard_manager) = self.shard_manager.get() {
            if !self.shards_stopped.swap(true, Ordering::AcqRel) {
                shard_manager.shutdown_all().await;
                report.shards_stopped = true;
            }
        }

        if report != TeardownReport::default() {
            info!(
                session = report.session_closed,
                database = report.database_closed,
                shards = report.shards_stopped,
                "Shutdown complete"
            );
        }
        report
    }
}
