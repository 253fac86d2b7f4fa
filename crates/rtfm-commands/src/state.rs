//! Shared application state, populated once during startup.

use crate::database::Database;
use crate::scraper::DocScraper;
use crate::session::HttpSession;
use once_cell::sync::OnceCell;
use rtfm_common::{LibraryRegistry, Result, RtfmError};

/// Resources shared by every command handler.
///
/// Each slot is written at most once. The scraper can only be installed from
/// an already-installed session, so a scraper never exists without one.
#[derive(Debug, Default)]
pub struct BotState {
    session: OnceCell<HttpSession>,
    database: OnceCell<Database>,
    libraries: OnceCell<LibraryRegistry>,
    scraper: OnceCell<DocScraper>,
}

impl BotState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the shared HTTP session.
    pub fn set_session(&self, session: HttpSession) -> Result<&HttpSession> {
        self.session
            .try_insert(session)
            .map_err(|_| RtfmError::lifecycle("HTTP session already initialised"))
    }

    /// Installs the database connection.
    pub fn set_database(&self, database: Database) -> Result<&Database> {
        self.database
            .try_insert(database)
            .map_err(|_| RtfmError::lifecycle("database already initialised"))
    }

    /// Installs the library registry read from the database.
    pub fn set_libraries(&self, libraries: LibraryRegistry) -> Result<&LibraryRegistry> {
        self.libraries
            .try_insert(libraries)
            .map_err(|_| RtfmError::lifecycle("library registry already initialised"))
    }

    /// Builds the scraper from the installed session.
    pub fn install_scraper(&self) -> Result<&DocScraper> {
        let session = self
            .session
            .get()
            .ok_or_else(|| RtfmError::lifecycle("scraper requires an open HTTP session"))?;
        self.scraper
            .try_insert(DocScraper::new(session.clone()))
            .map_err(|_| RtfmError::lifecycle("scraper already initialised"))
    }

    /// The shared HTTP session, if opened.
    pub fn session(&self) -> Option<&HttpSession> {
        self.session.get()
    }

    /// The database connection, if opened.
    pub fn database(&self) -> Option<&Database> {
        self.database.get()
    }

    /// The library registry, if loaded.
    pub fn libraries(&self) -> Option<&LibraryRegistry> {
        self.libraries.get()
    }

    /// The documentation scraper, if constructed.
    pub fn scraper(&self) -> Option<&DocScraper> {
        self.scraper.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtfm_config::HttpConfig;

    #[test]
    fn test_scraper_requires_session() {
        let state = BotState::new();
        assert!(state.install_scraper().is_err());
        assert!(state.scraper().is_none());

        state
            .set_session(HttpSession::open(&HttpConfig::default()).unwrap())
            .unwrap();
        assert!(state.install_scraper().is_ok());
        assert!(state.scraper().is_some());
    }

    #[test]
    fn test_slots_are_write_once() {
        let state = BotState::new();
        state.set_libraries(LibraryRegistry::new()).unwrap();

        let err = state.set_libraries(LibraryRegistry::new()).unwrap_err();
        assert!(err.to_string().contains("already initialised"));
    }

    #[test]
    fn test_scraper_shares_session_closed_flag() {
        let state = BotState::new();
        state
            .set_session(HttpSession::open(&HttpConfig::default()).unwrap())
            .unwrap();
        let scraper = state.install_scraper().unwrap();

        state.session().unwrap().close();
        assert!(scraper.session().is_closed());
    }
}
