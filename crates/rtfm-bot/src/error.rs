//! Application-wide error types using thiserror.

use rtfm_common::RtfmError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration, plugin, session or database failure.
    #[error(transparent)]
    Startup(#[from] RtfmError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
