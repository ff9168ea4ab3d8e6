//! In-memory modules for tests

use crate::error::{PluginError, Result};
use crate::module::{DeclarationResult, Module, Opener};
use crate::traits::{Plugin, PluginDeclaration};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Plugin that returns immediately
#[derive(Default)]
pub struct Noop;

impl Plugin for Noop {
    fn run(&self) {}
}

/// Symbols of one fake library
#[derive(Default, Clone)]
pub struct FakeModule {
    strings: HashMap<String, String>,
    declarations: HashMap<String, PluginDeclaration>,
    foreign: HashMap<String, String>,
}

impl FakeModule {
    /// A module exporting a valid `Plugin` and nothing else
    pub fn plugin() -> Self {
        Self::default().with_declaration("Plugin", PluginDeclaration::of::<Noop>())
    }

    pub fn with_string(mut self, symbol: &str, value: &str) -> Self {
        self.strings.insert(symbol.to_string(), value.to_string());
        self
    }

    pub fn with_declaration(mut self, symbol: &str, declaration: PluginDeclaration) -> Self {
        self.declarations.insert(symbol.to_string(), declaration);
        self
    }
}

impl FakeModule {
    /// Export `symbol` as something whose tags do not match
    pub fn with_foreign(mut self, symbol: &str, reason: &str) -> Self {
        self.foreign.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl Module for FakeModule {
    fn string(&self, symbol: &str) -> Option<String> {
        self.strings.get(symbol).cloned()
    }

    fn declaration(&self, symbol: &str) -> Option<DeclarationResult<'_>> {
        if let Some(reason) = self.foreign.get(symbol) {
            return Some(Err(reason.clone()));
        }
        self.declarations.get(symbol).map(Ok)
    }
}

/// Opens fake modules keyed by file name and records every path it was asked
/// to open. Unknown names fail like a non-library file would.
#[derive(Default)]
pub struct FakeOpener {
    modules: HashMap<String, FakeModule>,
    opened: Mutex<Vec<PathBuf>>,
}

impl FakeOpener {
    pub fn with(mut self, file_name: &str, module: FakeModule) -> Self {
        self.modules.insert(file_name.to_string(), module);
        self
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl Opener for FakeOpener {
    fn open(&self, path: &Path) -> Result<Arc<dyn Module>> {
        self.opened.lock().unwrap().push(path.to_path_buf());

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        match self.modules.get(file_name) {
            Some(module) => Ok(Arc::new(module.clone())),
            None => Err(PluginError::Open {
                path: path.to_path_buf(),
                reason: "invalid ELF header".to_string(),
            }),
        }
    }
}

/// Create empty files (and parent directories) under `root`
pub fn touch(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"").unwrap();
    }
}
