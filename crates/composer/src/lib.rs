//! Animated GIF composition.
//!
//! Every `.png` under a directory becomes one frame, in lexicographic path
//! order. Each frame gets the file's date label in its top-left corner and a
//! progress bar underneath showing how far into the sequence it is. Files
//! that cannot be decoded are logged and skipped without leaving a gap in
//! the frame order.

pub mod error;
pub mod font;
pub mod gif;
pub mod glyphs;
pub mod overlay;

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, error, info, warn};

use timelapse_common::{discover_files, FileKind, ItemReport, StageReport, DEFAULT_FRAME_DURATION_MS};

pub use error::{ComposeError, Result};
pub use font::LabelFont;
pub use gif::encode_gif;
pub use overlay::{compose_frame, FrameLayout};

/// What was drawn onto one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub label: String,
    /// Filled progress bar width in pixels
    pub fill_width: u32,
}

/// Outcome of a composition run.
#[derive(Debug)]
pub struct CompositionReport {
    pub frames: StageReport<FrameInfo, ComposeError>,
    /// Written GIF, or `None` when no frame could be built
    pub gif: Option<PathBuf>,
}

/// Builds an annotated GIF from a directory of PNGs.
#[derive(Debug)]
pub struct Composer {
    font: LabelFont,
    duration_ms: u32,
    repeat: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(LabelFont::load(None), DEFAULT_FRAME_DURATION_MS, true)
    }
}

impl Composer {
    pub fn new(font: LabelFont, duration_ms: u32, repeat: bool) -> Self {
        Self {
            font,
            duration_ms,
            repeat,
        }
    }

    /// Compose every `.png` under `input_dir` into `gif_path`.
    ///
    /// The progress total is the number of PNGs found, so skipped files
    /// still count toward it. Only a failure to write the GIF itself is
    /// returned as an error.
    pub fn compose_directory(&self, input_dir: &Path, gif_path: &Path) -> Result<CompositionReport> {
        info!(input = %input_dir.display(), gif = %gif_path.display(), "Starting GIF creation from PNG images");

        let png_files = discover_files(input_dir, FileKind::Png);
        let total = png_files.len();
        info!(count = total, "Found {} PNG files for GIF creation", total);

        let mut frames = StageReport::new(total);
        let mut canvases: Vec<RgbImage> = Vec::with_capacity(total);

        for (index, png_file) in png_files.into_iter().enumerate() {
            debug!(path = %png_file.display(), index, "Processing image");
            match self.compose_file(&png_file, index, total) {
                Ok((canvas, info)) => {
                    canvases.push(canvas);
                    frames.push(ItemReport::done(png_file, info));
                }
                Err(e) => {
                    error!(path = %png_file.display(), error = %e, "Error processing image");
                    frames.push(ItemReport::skipped(png_file, e));
                }
            }
        }

        if canvases.is_empty() {
            warn!(input = %input_dir.display(), "No valid images found to create GIF");
            return Ok(CompositionReport { frames, gif: None });
        }

        let frame_count = canvases.len();
        encode_gif(canvases, gif_path, self.duration_ms, self.repeat)?;
        info!(
            gif = %gif_path.display(),
            frames = frame_count,
            duration_ms = self.duration_ms,
            "Successfully created GIF"
        );

        Ok(CompositionReport {
            frames,
            gif: Some(gif_path.to_path_buf()),
        })
    }

    /// Decode one PNG and draw its overlay as frame `index` of `total`.
    pub fn compose_file(&self, png_file: &Path, index: usize, total: usize) -> Result<(RgbImage, FrameInfo)> {
        let image = image::open(png_file).map_err(|source| ComposeError::Decode {
            path: png_file.to_path_buf(),
            source,
        })?;

        let label = frame_label(png_file);
        let canvas = compose_frame(&image, &label, index, total, &self.font);
        let fill_width = FrameLayout::new(image.width(), image.height()).fill_width(index, total);

        Ok((canvas, FrameInfo { label, fill_width }))
    }
}

/// File name up to its first `.`, e.g. `20230101.png` gives `20230101`.
pub fn frame_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((label, _)) => label.to_string(),
        None => name,
    }
}
