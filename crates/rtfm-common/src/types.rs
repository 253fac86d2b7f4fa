//! Common type definitions for domain modeling.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Immutable mapping from library name to its documentation link.
///
/// Built once from the full `RTFM_DICTIONARY` table. When the same name
/// appears more than once, the last row wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRegistry {
    entries: HashMap<String, String>,
}

impl LibraryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the documentation link of a library by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Looks up a library ignoring ASCII case, preferring an exact match.
    pub fn find(&self, name: &str) -> Option<(&str, &str)> {
        if let Some((key, link)) = self.entries.get_key_value(name) {
            return Some((key.as_str(), link.as_str()));
        }
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, link)| (key.as_str(), link.as_str()))
    }

    /// Library names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of libraries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no libraries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, link)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for LibraryRegistry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for LibraryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} libraries", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LibraryRegistry {
        vec![
            ("tokio".to_string(), "https://docs.rs/tokio".to_string()),
            ("Serde".to_string(), "https://docs.rs/serde".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_last_duplicate_wins() {
        let registry: LibraryRegistry = vec![
            ("a".to_string(), "first".to_string()),
            ("a".to_string(), "second".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a"), Some("second"));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let registry = registry();
        assert_eq!(
            registry.find("serde"),
            Some(("Serde", "https://docs.rs/serde"))
        );
        assert_eq!(registry.get("serde"), None);
        assert!(registry.find("axum").is_none());
    }

    #[test]
    fn test_names_sorted() {
        assert_eq!(registry().names(), vec!["Serde", "tokio"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = LibraryRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.to_string(), "0 libraries");
    }
}
