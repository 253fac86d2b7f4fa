//! Library documentation lookups backed by the registry.

use crate::framework::{Context, Error};
use crate::plugins::{CommandSet, Plugin, PluginError};
use crate::scraper::DocScraper;
use rtfm_common::LibraryRegistry;

/// Registers `rtfm`.
pub struct RtfmPlugin;

impl Plugin for RtfmPlugin {
    fn name(&self) -> &'static str {
        "rtfm"
    }

    fn description(&self) -> &'static str {
        "Documentation links for registered libraries"
    }

    fn setup(&self, commands: &mut CommandSet) -> Result<(), PluginError> {
        commands.add(rtfm());
        Ok(())
    }
}

/// Links the documentation of a library, optionally searching it.
#[poise::command(prefix_command, aliases("docs"))]
pub async fn rtfm(
    ctx: Context<'_>,
    #[description = "Library name"] library: Option<String>,
    #[rest]
    #[description = "Search terms"]
    query: Option<String>,
) -> Result<(), Error> {
    let state = &ctx.data().state;
    let (Some(libraries), Some(scraper)) = (state.libraries(), state.scraper()) else {
        ctx.say("Documentation lookups are not available right now.").await?;
        return Ok(());
    };

    let response = rtfm_reply(libraries, scraper, library.as_deref(), query.as_deref())?;
    ctx.say(response).await?;
    Ok(())
}

/// Builds the reply for an `rtfm` invocation.
pub fn rtfm_reply(
    libraries: &LibraryRegistry,
    scraper: &DocScraper,
    library: Option<&str>,
    query: Option<&str>,
) -> rtfm_common::Result<String> {
    let Some(library) = library else {
        if libraries.is_empty() {
            return Ok("No libraries are registered.".to_string());
        }
        return Ok(format!("Available libraries: {}", libraries.names().join(", ")));
    };

    let Some((name, link)) = libraries.find(library) else {
        return Ok(format!("No documentation registered for `{library}`."));
    };

    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => {
            let url = scraper.search_url(link, query)?;
            Ok(format!("Search results for `{query}` in {name}: <{url}>"))
        }
        None => Ok(format!("{name}: <{link}>")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::HttpSession;
    use rtfm_common::test_utils::library_fixtures;
    use rtfm_config::HttpConfig;

    fn fixtures() -> (LibraryRegistry, DocScraper) {
        let libraries = library_fixtures::sample_rows().into_iter().collect();
        let scraper = DocScraper::new(HttpSession::open(&HttpConfig::default()).unwrap());
        (libraries, scraper)
    }

    #[test]
    fn test_lists_libraries() {
        let (libraries, scraper) = fixtures();
        assert_eq!(
            rtfm_reply(&libraries, &scraper, None, None).unwrap(),
            "Available libraries: discord.py, python, tokio"
        );
        assert_eq!(
            rtfm_reply(&LibraryRegistry::new(), &scraper, None, None).unwrap(),
            "No libraries are registered."
        );
    }

    #[test]
    fn test_links_library() {
        let (libraries, scraper) = fixtures();
        assert_eq!(
            rtfm_reply(&libraries, &scraper, Some("Python"), None).unwrap(),
            "python: <https://docs.python.org/3/>"
        );
        assert_eq!(
            rtfm_reply(&libraries, &scraper, Some("python"), Some("   ")).unwrap(),
            "python: <https://docs.python.org/3/>"
        );
    }

    #[test]
    fn test_searches_library() {
        let (libraries, scraper) = fixtures();
        assert_eq!(
            rtfm_reply(&libraries, &scraper, Some("tokio"), Some("select")).unwrap(),
            "Search results for `select` in tokio: <https://docs.rs/tokio/latest/tokio/search.html?q=select>"
        );
    }

    #[test]
    fn test_unknown_library() {
        let (libraries, scraper) = fixtures();
        assert_eq!(
            rtfm_reply(&libraries, &scraper, Some("cobol"), None).unwrap(),
            "No documentation registered for `cobol`."
        );
    }
}
