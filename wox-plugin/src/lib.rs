//! Wox Plugin System
//!
//! Loads native plugin libraries from a directory and runs them side by side.
//!
//! A plugin library is a `cdylib` that exports a [`PluginDeclaration`] under
//! the symbol `Plugin`, plus optional `Name`, `Description` and `Version`
//! strings. [`export_plugin!`] writes all of them:
//!
//! ```rust,ignore
//! use wox_plugin::Plugin;
//!
//! #[derive(Default)]
//! struct Timer;
//!
//! impl Plugin for Timer {
//!     fn run(&self) {
//!         loop {
//!             std::thread::sleep(std::time::Duration::from_secs(1));
//!             eprintln!("time ticker");
//!         }
//!     }
//! }
//!
//! wox_plugin::export_plugin!(Timer, name = "Timer", version = "1.0.0");
//! ```
//!
//! The host side is a [`PluginManager`]:
//!
//! ```rust,ignore
//! let mut manager = PluginManager::new();
//! manager.load("plugins")?;
//! manager.run();
//! ```

mod error;
mod loader;
mod manager;
mod module;
mod registry;
mod traits;

#[cfg(test)]
mod testing;

pub use error::{PluginError, Result};
pub use loader::PluginLoader;
pub use manager::PluginManager;
pub use module::{DeclarationResult, Module, NativeModule, NativeOpener, Opener};
pub use registry::{PluginInfo, PluginRecord, PluginRegistry};
pub use traits::{
    ABI_VERSION, DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_VERSION, DESCRIPTION_SYMBOL,
    ENTRY_SYMBOL, NAME_SYMBOL, PLUGIN_MAGIC, Plugin, PluginDeclaration, RUSTC_VERSION,
    VERSION_SYMBOL,
};
