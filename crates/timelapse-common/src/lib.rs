//! Common types and utilities shared across the tif2gif pipeline stages.

pub mod config;
pub mod discover;
pub mod error;
pub mod report;

pub use config::{PipelineConfig, PipelineSettings, DEFAULT_FRAME_DURATION_MS};
pub use discover::{discover_files, FileKind};
pub use error::{ConfigError, ConfigResult};
pub use report::{ItemReport, ItemStatus, StageReport};
