//! Plugin loading errors

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors raised while loading plugins. Every variant is fatal to a
/// directory load.
#[derive(Error, Debug)]
pub enum PluginError {
    /// The file is not a loadable library for this platform
    #[error("cannot open {} as a plugin library: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    /// The required entry point symbol is not exported
    #[error("{}: symbol `{symbol}` not found", .path.display())]
    EntryPointNotFound { path: PathBuf, symbol: &'static str },

    /// The entry point symbol exists but is not a plugin declaration
    #[error("{}: not a plugin ({reason})", .path.display())]
    NotAPlugin { path: PathBuf, reason: String },

    /// The plugin directory could not be walked
    #[error("failed to walk plugin directory: {0}")]
    Traversal(#[from] walkdir::Error),
}

impl PluginError {
    /// The file or directory the error refers to, when known
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. }
            | Self::EntryPointNotFound { path, .. }
            | Self::NotAPlugin { path, .. } => Some(path),
            Self::Traversal(e) => e.path(),
        }
    }
}
