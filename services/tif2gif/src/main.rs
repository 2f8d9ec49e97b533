//! tif2gif command line entry point.
//!
//! Converts a directory of TIF rasters into normalized PNGs, then composes
//! those PNGs into a labelled timelapse GIF.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use timelapse_common::PipelineSettings;
use tif2gif::logging::{init_logging, LoggingOptions, DEFAULT_LOG_FILE};

#[derive(Parser, Debug)]
#[command(name = "tif2gif")]
#[command(about = "Convert TIF rasters to PNGs and compose them into an annotated GIF")]
struct Args {
    /// YAML settings file; command line values take precedence
    #[arg(short, long, env = "TIF2GIF_CONFIG")]
    config: Option<PathBuf>,

    /// Directory searched recursively for .tif files
    #[arg(short, long, env = "TIF2GIF_INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Directory receiving the converted PNGs
    #[arg(short, long, env = "TIF2GIF_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Path of the GIF to write
    #[arg(short, long, env = "TIF2GIF_GIF_PATH")]
    gif_path: Option<PathBuf>,

    /// Sample value treated as no-data and set to zero before stretching
    #[arg(long, env = "TIF2GIF_NODATA", allow_negative_numbers = true)]
    nodata: Option<f64>,

    /// Display time of each GIF frame in milliseconds [default: 300]
    #[arg(short, long, env = "TIF2GIF_DURATION_MS")]
    duration_ms: Option<u32>,

    /// TrueType font for the date labels
    #[arg(long, env = "TIF2GIF_FONT")]
    font: Option<PathBuf>,

    /// Play the GIF once instead of looping
    #[arg(long)]
    no_loop: bool,

    /// Log file, rotated at 1 MB
    #[arg(long, env = "TIF2GIF_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Console log level
    #[arg(long, env = "TIF2GIF_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit console logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            gif_path: self.gif_path.clone(),
            nodata: self.nodata,
            duration_ms: self.duration_ms,
            font_path: self.font.clone(),
            repeat: self.no_loop.then_some(false),
        }
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&LoggingOptions {
        level: args.log_level.clone(),
        json: args.json_logs,
        log_file: Some(args.log_file.clone()),
    })?;

    let file_settings = match &args.config {
        Some(path) => PipelineSettings::from_yaml_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => PipelineSettings::default(),
    };
    let config = file_settings
        .merge(args.settings())
        .build()
        .context("Invalid pipeline configuration")?;

    match tif2gif::run(&config) {
        Ok(report) => {
            if report.produced_gif() {
                info!(gif = %config.gif_path.display(), "Timelapse ready");
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Process failed");
            Err(e)
        }
    }
}
