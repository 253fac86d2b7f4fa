//! Documentation scraper service built on the shared HTTP session.

use crate::session::HttpSession;
use rtfm_common::{Result, RtfmError};
use url::Url;

/// Fetches documentation pages through the shared session.
#[derive(Debug, Clone)]
pub struct DocScraper {
    session: HttpSession,
}

impl DocScraper {
    /// Creates a scraper that borrows `session` for all requests.
    pub fn new(session: HttpSession) -> Self {
        Self { session }
    }

    /// The session this scraper sends requests through.
    pub fn session(&self) -> &HttpSession {
        &self.session
    }

    /// Builds the Sphinx-style search URL `<base>/search.html?q=<query>`.
    pub fn search_url(&self, base: &str, query: &str) -> Result<Url> {
        let mut base = Url::parse(base)
            .map_err(|e| RtfmError::validation_field(format!("invalid link: {e}"), "link"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base
            .join("search.html")
            .map_err(|e| RtfmError::validation_field(format!("invalid link: {e}"), "link"))?;
        url.query_pairs_mut().clear().append_pair("q", query);
        Ok(url)
    }

    /// Fetches the raw page at `url`.
    pub async fn fetch_page(&self, url: &Url) -> Result<String> {
        self.session.get_text(url.as_str()).await
    }
}
