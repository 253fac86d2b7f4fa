//! # RTFM Config
//!
//! Configuration for RTFM Bot: a YAML schema with defaults, environment
//! variable overrides (including `.env` files) and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
