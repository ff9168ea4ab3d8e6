//! Configuration type definitions
//!
//! These types represent the runtime configuration for the Wox host.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the Wox host
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HostConfig {
    /// Plugin discovery configuration
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Global logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how plugins are discovered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginsConfig {
    /// Directory scanned (recursively) for plugin libraries
    #[serde(default = "default_plugin_dir")]
    pub dir: PathBuf,

    /// Follow symbolic links while walking the plugin directory
    #[serde(default)]
    pub follow_links: bool,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dir: default_plugin_dir(),
            follow_links: false,
        }
    }
}

fn default_plugin_dir() -> PathBuf {
    PathBuf::from("plugins")
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.plugins.dir, PathBuf::from("plugins"));
        assert!(!config.plugins.follow_links);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_json_deserialize() {
        let json = r#"{
            "plugins": { "dir": "/opt/wox/plugins", "follow_links": true }
        }"#;
        let config: HostConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.plugins.dir, PathBuf::from("/opt/wox/plugins"));
        assert!(config.plugins.follow_links);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: HostConfig = toml::from_str("[plugins]\nfollow_links = true\n").unwrap();
        assert_eq!(config.plugins.dir, PathBuf::from("plugins"));
        assert!(config.plugins.follow_links);
    }
}
