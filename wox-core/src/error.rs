//! Error types for Wox

use thiserror::Error;

/// Result type for Wox host operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Wox host
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
