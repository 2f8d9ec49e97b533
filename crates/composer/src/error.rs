//! Error types for the composer crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while composing frames or writing the GIF.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Failed to read image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create GIF file {path}: {source}")]
    CreateGif {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode GIF {path}: {source}")]
    EncodeGif {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for composer operations.
pub type Result<T> = std::result::Result<T, ComposeError>;
