//! Build-time list of plugins the loader can resolve manifests against.

use super::Plugin;
use crate::cogs::{meta::MetaPlugin, rtfm::RtfmPlugin};
use std::sync::Arc;

/// Ordered set of available plugins.
#[derive(Clone, Default)]
pub struct PluginCatalog {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin.
    pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Finds a plugin by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.iter().find(|plugin| plugin.name() == name)
    }

    /// Plugins in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Plugin>> {
        self.plugins.iter()
    }

    /// Number of plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// The plugins shipped with the bot.
pub fn builtin_catalog() -> PluginCatalog {
    PluginCatalog::new().with(MetaPlugin).with(RtfmPlugin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = builtin_catalog();
        let names: Vec<_> = catalog.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["meta", "rtfm"]);
        assert!(catalog.get("rtfm").is_some());
        assert!(catalog.get("music").is_none());
    }
}
