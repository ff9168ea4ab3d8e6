//! Configuration loader

use crate::config::HostConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "wox.toml";

/// Configuration loader for various formats
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<HostConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => Err(Error::Config(format!("Unknown config format: {}", ext))),
        }
    }

    /// Load `path` if given, else `wox.toml` in the working directory if it
    /// exists, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<HostConfig> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("No config file, using defaults");
                Ok(HostConfig::default())
            }
        }
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<HostConfig> {
        serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<HostConfig> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_json_loading() {
        let json = r#"{"plugins": {"dir": "mods"}}"#;
        let config = ConfigLoader::from_json(json).unwrap();
        assert_eq!(config.plugins.dir, PathBuf::from("mods"));
    }

    #[test]
    fn test_toml_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wox.toml");
        std::fs::write(&path, "[plugins]\ndir = \"ext\"\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.plugins.dir, PathBuf::from("ext"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wox.yaml");
        std::fs::write(&path, "plugins: {}").unwrap();

        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("yaml")));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ConfigLoader::load("/nonexistent/wox.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ConfigLoader::from_toml("[plugins\n").is_err());
    }
}
