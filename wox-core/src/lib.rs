//! Wox Core Library
//!
//! Shared pieces of the Wox plugin host: the host configuration model,
//! its file loader and the common error type.

pub mod config;
pub mod error;

pub use error::{Error, Result};

/// Wox version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
