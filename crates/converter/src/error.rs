//! Error types for the converter crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a TIF raster to PNG.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open file: {0}")]
    Open(#[from] std::io::Error),

    #[error("Failed to decode TIF data: {0}")]
    Decode(#[from] tiff::TiffError),

    #[error("Unsupported TIF color type: {0}")]
    UnsupportedColorType(String),

    #[error("Raster has no pixels ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },

    #[error("Sample count {samples} does not fit a {width}x{height} raster")]
    SampleCountMismatch {
        samples: usize,
        width: u32,
        height: u32,
    },

    #[error("Cannot store {channels}-channel {sample_type} raster as PNG")]
    UnsupportedLayout {
        channels: usize,
        sample_type: &'static str,
    },

    #[error("Failed to write PNG {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
