//! Built-in plugins.

pub mod meta;
pub mod rtfm;
