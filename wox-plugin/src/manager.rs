//! Plugin manager
//!
//! Owns the registry. Plugins are registered while the host starts up and
//! then run together; there is no way back from running to registering.

use crate::error::Result;
use crate::loader::PluginLoader;
use crate::module::Opener;
use crate::registry::{PluginInfo, PluginRecord, PluginRegistry};
use std::path::Path;
use std::thread;

/// Plugin manager
#[derive(Debug, Default)]
pub struct PluginManager {
    registry: PluginRegistry,
}

impl PluginManager {
    /// Create a manager with no plugins
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every plugin library under `dir`
    pub fn load(&mut self, dir: impl AsRef<Path>) -> Result<&mut Self> {
        self.load_with(&PluginLoader::new(), dir)
    }

    /// Load every plugin under `dir` through `loader`.
    ///
    /// All or nothing: on error the registry is left as it was.
    pub fn load_with<O: Opener>(
        &mut self,
        loader: &PluginLoader<O>,
        dir: impl AsRef<Path>,
    ) -> Result<&mut Self> {
        let dir = dir.as_ref();
        tracing::debug!("Loading plugins from {}", dir.display());

        let staged = loader.load_dir(dir)?;
        for record in staged {
            self.add(record)?;
        }

        Ok(self)
    }

    /// Register a plugin
    pub fn add(&mut self, record: PluginRecord) -> Result<()> {
        tracing::info!(
            "Loaded plugin [{}] (v{}) - {}",
            record.name(),
            record.version(),
            record.description()
        );
        self.registry.register(record);
        Ok(())
    }

    /// Number of registered plugins
    pub fn count(&self) -> usize {
        self.registry.len()
    }

    /// True when no plugin is registered
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Registered plugins in load order
    pub fn plugins(&self) -> &[PluginRecord] {
        self.registry.as_slice()
    }

    /// Information about every registered plugin
    pub fn list(&self) -> Vec<PluginInfo> {
        self.registry.list()
    }

    /// Run every plugin on its own thread and wait for all of them.
    ///
    /// Blocks forever if any plugin never returns. Panics inside a plugin are
    /// not caught.
    pub fn run(&self) {
        if self.is_empty() {
            tracing::warn!("No plugins to run");
            return;
        }

        thread::scope(|scope| {
            for record in self.plugins() {
                let spawned = thread::Builder::new()
                    .name(thread_name(record.name()))
                    .spawn_scoped(scope, move || {
                        tracing::info!("Running plugin [{}] (v{})", record.name(), record.version());
                        record.run();
                        tracing::debug!("Plugin [{}] returned", record.name());
                    });

                if let Err(e) = spawned {
                    tracing::error!("Failed to start plugin [{}]: {}", record.name(), e);
                }
            }
        });
    }
}

/// Thread names may not contain NUL; plugin names are not validated.
fn thread_name(plugin: &str) -> String {
    format!("plugin-{}", plugin.replace('\0', "\\0"))
}
