//! Process-wide sink for errors that escape event and command handlers.
//!
//! Errors are logged with their full source chain and then dropped; the
//! event that caused them is not retried and the event loop keeps running.

use futures::FutureExt;
use rtfm_common::error_chain;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::error;

/// Result of running one dispatch unit through [`ErrorSink::guard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler finished without error.
    Completed,
    /// The handler failed or panicked; the failure was logged.
    Failed,
}

/// Logs and swallows dispatch-time errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    reported: Arc<AtomicU64>,
}

impl ErrorSink {
    /// Creates a sink with a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors reported so far, across all clones.
    pub fn reported(&self) -> u64 {
        self.reported.load(Ordering::Relaxed)
    }

    /// Logs `err` with its source chain under `context`.
    pub fn report(&self, context: &str, err: &(dyn std::error::Error + 'static)) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        error!(context, "Unhandled error: {}", error_chain(err));
        error!(context, "{:?}", err);
    }

    /// Logs a message that has no error value attached.
    pub fn report_message(&self, context: &str, message: &str) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        error!(context, "Unhandled error: {}", message);
    }

    /// Runs one handler, logging an `Err` or a panic instead of propagating it.
    pub async fn guard<F, E>(&self, context: &str, handler: F) -> DispatchOutcome
    where
        F: Future<Output = Result<(), E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        match AssertUnwindSafe(handler).catch_unwind().await {
            Ok(Ok(())) => DispatchOutcome::Completed,
            Ok(Err(err)) => {
                let err: Box<dyn std::error::Error + Send + Sync> = err.into();
                self.report(context, err.as_ref());
                DispatchOutcome::Failed
            }
            Err(panic) => {
                let message = format!("handler panicked: {}", panic_message(panic.as_ref()));
                self.report_message(context, &message);
                DispatchOutcome::Failed
            }
        }
    }
}

/// Text of a panic payload, when it carries one.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtfm_common::RtfmError;

    #[tokio::test]
    async fn test_failed_event_does_not_stop_later_events() {
        let sink = ErrorSink::new();
        let mut processed = Vec::new();

        for event in ["first", "second", "third"] {
            let outcome = sink
                .guard(event, async {
                    if event == "first" {
                        return Err(RtfmError::new("handler exploded"));
                    }
                    processed.push(event);
                    Ok(())
                })
                .await;
            if event == "first" {
                assert_eq!(outcome, DispatchOutcome::Failed);
            } else {
                assert_eq!(outcome, DispatchOutcome::Completed);
            }
        }

        assert_eq!(processed, vec!["second", "third"]);
        assert_eq!(sink.reported(), 1);
    }

    #[tokio::test]
    async fn test_panicking_handler_is_contained() {
        let sink = ErrorSink::new();

        let outcome = sink
            .guard("message", async {
                if sink.reported() == 0 {
                    panic!("boom");
                }
                Ok::<(), RtfmError>(())
            })
            .await;
        assert_eq!(outcome, DispatchOutcome::Failed);

        let outcome = sink.guard("message", async { Ok::<(), RtfmError>(()) }).await;
        assert_eq!(outcome, DispatchOutcome::Completed);
        assert_eq!(sink.reported(), 1);
    }

    #[test]
    fn test_counter_shared_between_clones() {
        let sink = ErrorSink::new();
        let clone = sink.clone();
        clone.report_message("ready", "lost connection");
        assert_eq!(sink.reported(), 1);
    }
}
