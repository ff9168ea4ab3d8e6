//! Host configuration

mod loader;
mod types;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};
pub use types::{HostConfig, LoggingConfig, PluginsConfig};
