//! Test helpers shared by the tif2gif crates.
//!
//! - [`TestWorkspace`]: a throwaway input/output/GIF layout
//! - TIF and PNG fixture writers, including deliberately corrupt files
//! - Synthetic 16-bit RGB and 8-bit gray rasters
//! - [`capture_logs`] for asserting on emitted `tracing` events
//!
//! Pulled in as a dev-dependency only:
//!
//! ```ignore
//! use test_utils::{capture_logs, names, write_rgb16_tif, TestWorkspace};
//! ```

pub mod capture;
pub mod fixtures;
pub mod generators;

pub use capture::*;
pub use fixtures::*;
pub use generators::*;
