//! The single HTTP session shared by every command and service.

use rtfm_common::{Result, RtfmError};
use rtfm_config::HttpConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Cloneable handle to the shared HTTP client.
///
/// All clones share one connection pool and one closed flag; once closed,
/// every clone refuses new requests.
#[derive(Clone)]
pub struct HttpSession {
    client: reqwest::Client,
    closed: Arc<AtomicBool>,
}

impl std::fmt::Debug for HttpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSession")
            .field("client", &"<reqwest::Client>")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl HttpSession {
    /// Opens a session configured with the user agent and request timeout.
    pub fn open(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| RtfmError::network_with_source("Failed to build HTTP client", e))?;

        info!(
            "HTTP session opened (timeout {}s)",
            config.request_timeout_seconds
        );
        Ok(Self {
            client,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Whether [`close`](Self::close) has been called on any clone.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Marks the session closed. Returns `true` only for the call that
    /// actually closed it.
    ///
    /// Closing stops new requests through every clone, but reqwest keeps its
    /// idle connections until the last clone (including the one inside the
    /// scraper) is dropped with the bot state.
    pub fn close(&self) -> bool {
        let was_open = !self.closed.swap(true, Ordering::AcqRel);
        if was_open {
            debug!("HTTP session closed");
        }
        was_open
    }

    /// The underlying client, or an error once the session is closed.
    pub fn client(&self) -> Result<&reqwest::Client> {
        if self.is_closed() {
            return Err(RtfmError::network("HTTP session is closed"));
        }
        Ok(&self.client)
    }

    /// GET `url` and return the body as text, failing on non-success status.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client()?.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_is_idempotent_across_clones() {
        let session = HttpSession::open(&HttpConfig::default()).unwrap();
        let clone = session.clone();

        assert!(!clone.is_closed());
        assert!(session.close());
        assert!(clone.is_closed());
        assert!(!clone.close());
        assert!(!session.close());
    }

    #[tokio::test]
    async fn test_closed_session_refuses_requests() {
        let session = HttpSession::open(&HttpConfig::default()).unwrap();
        session.close();

        assert!(session.client().is_err());
        let err = session.get_text("http://127.0.0.1:9/").await.unwrap_err();
        assert_eq!(err.to_string(), "Network error: HTTP session is closed");
    }
}
