//! Plugin registry

use crate::module::Module;
use crate::traits::{DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_VERSION, Plugin};
use std::fmt;
use std::sync::Arc;

/// Plugin information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plugin name
    pub name: String,
    /// Plugin description
    pub description: String,
    /// Plugin version, as declared; not validated
    pub version: String,
}

impl PluginInfo {
    /// Create plugin information
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
        }
    }
}

impl Default for PluginInfo {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_DESCRIPTION, DEFAULT_VERSION)
    }
}

/// A loaded plugin: its metadata and entry point
pub struct PluginRecord {
    info: PluginInfo,
    entry: Box<dyn Plugin>,
    // Declared after `entry` so the library outlives the code it provides.
    _module: Option<Arc<dyn Module>>,
}

impl PluginRecord {
    /// Create a record for an in-process plugin
    pub fn new(info: PluginInfo, entry: Box<dyn Plugin>) -> Self {
        Self {
            info,
            entry,
            _module: None,
        }
    }

    /// Keep `module` loaded for as long as this record exists
    pub(crate) fn with_module(mut self, module: Arc<dyn Module>) -> Self {
        self._module = Some(module);
        self
    }

    /// Plugin information
    pub fn info(&self) -> &PluginInfo {
        &self.info
    }

    /// Plugin name
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Plugin description
    pub fn description(&self) -> &str {
        &self.info.description
    }

    /// Plugin version
    pub fn version(&self) -> &str {
        &self.info.version
    }

    /// Invoke the entry point on the current thread
    pub fn run(&self) {
        self.entry.run();
    }
}

impl fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRecord")
            .field("info", &self.info)
            .field("native", &self._module.is_some())
            .finish()
    }
}

/// Append-only, insertion-ordered plugin registry
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<PluginRecord>,
}

impl PluginRegistry {
    /// Create a new plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register(&mut self, record: PluginRecord) {
        self.plugins.push(record);
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Registered plugins in registration order
    pub fn as_slice(&self) -> &[PluginRecord] {
        &self.plugins
    }

    /// List all registered plugins
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(|p| p.info.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Noop;

    #[test]
    fn test_default_info() {
        let info = PluginInfo::default();
        assert_eq!(info, PluginInfo::new("Untitled", "", "0.0.0"));
    }

    #[test]
    fn test_registration_order() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());

        for name in ["zeta", "alpha", "mid"] {
            registry.register(PluginRecord::new(
                PluginInfo::new(name, "", "1.0.0"),
                Box::new(Noop),
            ));
        }

        assert_eq!(registry.len(), 3);
        let names: Vec<_> = registry.list().into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }
}
