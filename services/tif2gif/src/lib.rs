//! TIF to timelapse GIF pipeline.
//!
//! Runs the two stages back to back:
//! 1. [`Converter`] turns every `.tif` under the input directory into a PNG
//! 2. [`Composer`] labels those PNGs and encodes them as one animated GIF
//!
//! The composer always runs, even when the converter produced nothing.

pub mod logging;

use anyhow::{Context, Result};
use tracing::info;

use composer::{Composer, CompositionReport, LabelFont};
use converter::{ConversionReport, Converter};
use timelapse_common::PipelineConfig;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    pub conversion: ConversionReport,
    pub composition: CompositionReport,
}

impl PipelineReport {
    /// True when a GIF was written.
    pub fn produced_gif(&self) -> bool {
        self.composition.gif.is_some()
    }
}

/// Run conversion followed by composition.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    config.validate().context("Invalid pipeline configuration")?;
    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        gif = %config.gif_path.display(),
        "Starting the entire process"
    );

    let converter = Converter::new(config.nodata);
    let conversion = converter
        .convert_directory(&config.input_dir, &config.output_dir)
        .context("TIF to PNG conversion failed")?;

    let font = LabelFont::load(config.font_path.as_deref());
    let composer = Composer::new(font, config.duration_ms, config.repeat);
    let composition = composer
        .compose_directory(&config.output_dir, &config.gif_path)
        .context("GIF creation failed")?;

    info!(
        converted = conversion.completed(),
        conversion_skipped = conversion.skipped(),
        frames = composition.frames.completed(),
        frames_skipped = composition.frames.skipped(),
        gif_written = composition.gif.is_some(),
        "Process completed"
    );

    Ok(PipelineReport {
        conversion,
        composition,
    })
}
