//! Test utilities and shared test helpers for RTFM Bot.
//!
//! Available to other crates through the `testing` feature.

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write a plugin manifest named `file_name` into `dir`.
pub fn write_manifest(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, contents).expect("Failed to write plugin manifest");
    path
}

/// Library registry fixtures.
pub mod library_fixtures {
    /// A handful of `(name, link)` rows as stored in `RTFM_DICTIONARY`.
    pub fn sample_rows() -> Vec<(String, String)> {
        vec![
            ("python".to_string(), "https://docs.python.org/3/".to_string()),
            (
                "discord.py".to_string(),
                "https://discordpy.readthedocs.io/en/latest/".to_string(),
            ),
            ("tokio".to_string(), "https://docs.rs/tokio/latest/tokio/".to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_manifest() {
        let dir = create_temp_dir();
        let path = write_manifest(dir.path(), "meta.toml", "name = \"meta\"\n");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "name = \"meta\"\n");
    }

    #[test]
    fn test_sample_rows_unique() {
        let rows = library_fixtures::sample_rows();
        let registry: crate::LibraryRegistry = rows.clone().into_iter().collect();
        assert_eq!(registry.len(), rows.len());
    }
}
