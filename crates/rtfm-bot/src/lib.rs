//! # RTFM Bot
//!
//! Discord bot answering read-the-manual requests.
//!
//! This crate owns the process lifecycle: it opens the shared resources in
//! order, hands them to the Poise framework, and releases them again on
//! shutdown.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod lifecycle;

pub use bot::*;
pub use error::*;
pub use lifecycle::*;
