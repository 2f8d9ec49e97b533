//! TIF to PNG conversion.
//!
//! Walks a directory tree for `.tif` rasters, normalizes each one and writes
//! it as a PNG into a flat output directory:
//!
//! - Three-band rasters are percentile-stretched band by band
//! - Other layouts are written as-is
//! - An optional no-data value is zeroed before anything else
//!
//! A file that cannot be read, normalized or written is logged and skipped;
//! the returned [`ConversionReport`] records the reason.

pub mod error;
pub mod normalize;
pub mod raster;
pub mod stretch;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use timelapse_common::{discover_files, FileKind, ItemReport, StageReport};

pub use error::{ConvertError, Result};
pub use normalize::normalize;
pub use raster::{read_tif, Raster, Samples};
pub use stretch::{ChannelStretch, HIGH_PERCENTILE, LOW_PERCENTILE};

/// Per-file outcomes of a conversion run; done items carry the PNG path.
pub type ConversionReport = StageReport<PathBuf, ConvertError>;

/// Converts TIF rasters into normalized PNGs.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    /// Sample value zeroed before stretching
    nodata: Option<f64>,
}

impl Converter {
    pub fn new(nodata: Option<f64>) -> Self {
        Self { nodata }
    }

    /// Convert every `.tif` under `input_dir` into `output_dir`.
    ///
    /// Only a failure to create `output_dir` is returned as an error.
    pub fn convert_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<ConversionReport> {
        info!(input = %input_dir.display(), output = %output_dir.display(), "Starting TIF to PNG conversion");

        fs::create_dir_all(output_dir).map_err(|source| ConvertError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let tif_files = discover_files(input_dir, FileKind::Tif);
        info!(count = tif_files.len(), "Found {} TIF files", tif_files.len());

        let mut report = ConversionReport::new(tif_files.len());
        for tif_file in tif_files {
            debug!(path = %tif_file.display(), "Converting to PNG");
            match self.convert_file(&tif_file, output_dir) {
                Ok(png_file) => report.push(ItemReport::done(tif_file, png_file)),
                Err(e) => {
                    error!(path = %tif_file.display(), error = %e, "Error converting TIF to PNG");
                    report.push(ItemReport::skipped(tif_file, e));
                }
            }
        }

        info!(
            converted = report.completed(),
            skipped = report.skipped(),
            "TIF to PNG conversion finished"
        );
        Ok(report)
    }

    /// Convert one file, returning the path of the written PNG.
    pub fn convert_file(&self, tif_file: &Path, output_dir: &Path) -> Result<PathBuf> {
        let raster = read_tif(tif_file)?;
        debug!(
            path = %tif_file.display(),
            width = raster.width,
            height = raster.height,
            channels = raster.channels,
            sample_type = raster.samples.type_name(),
            "Decoded raster"
        );

        let image = normalize(raster, self.nodata)?;

        let png_file = output_dir.join(png_file_name(tif_file));
        image
            .save_with_format(&png_file, image::ImageFormat::Png)
            .map_err(|source| ConvertError::Encode {
                path: png_file.clone(),
                source,
            })?;
        Ok(png_file)
    }
}

/// `<name>.tif` becomes `<name>.png`; directories are dropped.
pub fn png_file_name(tif_file: &Path) -> String {
    let name = tif_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(FileKind::Tif.suffix()).unwrap_or(&name);
    format!("{stem}{}", FileKind::Png.suffix())
}
