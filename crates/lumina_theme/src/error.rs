//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating Lumina configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a config file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// A scale setting is out of range
    #[error("Invalid scale setting `{field}`: {value} ({reason})")]
    InvalidScale {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
