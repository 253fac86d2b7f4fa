//! # RTFM Commands
//!
//! Everything the bot dispatches through: the dynamic prefix resolver, the
//! plugin system and built-in cogs, the shared resources handed to every
//! command, and the error sink behind the framework's `on_error` hook.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cogs;
pub mod database;
pub mod error_sink;
pub mod framework;
pub mod plugins;
pub mod prefix;
pub mod scraper;
pub mod session;
pub mod state;

pub use database::Database;
pub use error_sink::{DispatchOutcome, ErrorSink};
pub use framework::*;
pub use plugins::{builtin_catalog, LoadReport, LoadedPlugins, PluginCatalog, PluginLoader};
pub use scraper::DocScraper;
pub use session::HttpSession;
pub use state::BotState;
