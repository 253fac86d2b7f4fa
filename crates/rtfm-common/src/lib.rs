//! # RTFM Common
//!
//! Shared error types, logging setup and the library registry type used by
//! every crate in the RTFM Bot workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{error_chain, Result, RtfmError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use types::*;
