//! Plugin loader
//!
//! Turns library files into [`PluginRecord`]s. Loading is sequential and
//! stops at the first file that is not a usable plugin.

use crate::error::{PluginError, Result};
use crate::module::{Module, NativeOpener, Opener};
use crate::registry::{PluginInfo, PluginRecord};
use crate::traits::{
    DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_VERSION, DESCRIPTION_SYMBOL, ENTRY_SYMBOL,
    NAME_SYMBOL, VERSION_SYMBOL,
};
use std::path::Path;
use walkdir::WalkDir;
use wox_core::config::PluginsConfig;

/// Plugin loader
#[derive(Debug, Default)]
pub struct PluginLoader<O = NativeOpener> {
    opener: O,
    follow_links: bool,
}

impl PluginLoader {
    /// Loader for native shared libraries
    pub fn new() -> Self {
        Self::with_opener(NativeOpener)
    }

    /// Native loader configured from the `[plugins]` section
    pub fn from_config(config: &PluginsConfig) -> Self {
        Self::new().follow_links(config.follow_links)
    }
}

impl<O: Opener> PluginLoader<O> {
    /// Loader that opens modules through `opener`
    pub fn with_opener(opener: O) -> Self {
        Self {
            opener,
            follow_links: false,
        }
    }

    /// Follow symbolic links while walking directories
    pub fn follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// The opener used for every file
    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Parse one library file into a record
    pub fn parse_file(&self, path: &Path) -> Result<PluginRecord> {
        let module = self.opener.open(path)?;

        let declared =
            module
                .declaration(ENTRY_SYMBOL)
                .ok_or_else(|| PluginError::EntryPointNotFound {
                    path: path.to_path_buf(),
                    symbol: ENTRY_SYMBOL,
                })?;

        let info = PluginInfo {
            name: metadata(module.as_ref(), path, NAME_SYMBOL, DEFAULT_NAME),
            description: metadata(module.as_ref(), path, DESCRIPTION_SYMBOL, DEFAULT_DESCRIPTION),
            version: metadata(module.as_ref(), path, VERSION_SYMBOL, DEFAULT_VERSION),
        };

        let declaration = declared
            .and_then(|declaration| declaration.check().map(|()| declaration))
            .map_err(|reason| PluginError::NotAPlugin {
                path: path.to_path_buf(),
                reason,
            })?;

        let entry = (declaration.constructor)();

        Ok(PluginRecord::new(info, entry).with_module(module))
    }

    /// Load every file under `dir`, recursively, in file name order
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<PluginRecord>> {
        let mut records = Vec::new();

        let walker = WalkDir::new(dir)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            tracing::debug!("Parsing plugin file: {}", entry.path().display());
            records.push(self.parse_file(entry.path())?);
        }

        Ok(records)
    }
}

fn metadata(module: &dyn Module, path: &Path, symbol: &str, default: &str) -> String {
    module.string(symbol).unwrap_or_else(|| {
        tracing::debug!(
            "{}: no `{}` symbol, using {:?}",
            path.display(),
            symbol,
            default
        );
        default.to_string()
    })
}
