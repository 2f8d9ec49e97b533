//! Error types for pipeline configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid value for '{setting}': {message}")]
    InvalidSetting {
        setting: &'static str,
        message: String,
    },
}
