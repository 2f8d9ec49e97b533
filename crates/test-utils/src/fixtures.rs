//! Common test fixtures for tif2gif tests.
//!
//! Writers here panic on failure: they only run inside tests, where a
//! fixture that cannot be written is a broken test environment.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tempfile::TempDir;
use tiff::encoder::{colortype, TiffEncoder};

/// Frame names following the date-stamped naming convention.
pub mod names {
    /// Three consecutive daily frames
    pub const DAILY: [&str; 3] = ["20230101", "20230102", "20230103"];

    /// A name with extra dot-separated parts after the date
    pub const WITH_SUFFIX: &str = "20230104.B04.scene";
}

/// Temporary directory laid out like a pipeline run.
///
/// ```text
/// <tmp>/input_tif/
/// <tmp>/output_png/
/// <tmp>/timelapse.gif
/// ```
///
/// The directory is removed when the workspace is dropped.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Creates the workspace with an empty input directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("input_tif")).expect("Failed to create input dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.dir.path().join("input_tif")
    }

    /// Not created up front; the converter is expected to create it.
    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("output_png")
    }

    pub fn gif_path(&self) -> PathBuf {
        self.dir.path().join("timelapse.gif")
    }

    /// Path for `<name>.tif` inside the input directory.
    pub fn input_tif(&self, name: &str) -> PathBuf {
        self.input_dir().join(format!("{name}.tif"))
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn create_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
}

fn tiff_encoder(path: &Path) -> TiffEncoder<BufWriter<File>> {
    create_parent(path);
    let file = File::create(path).expect("Failed to create TIF fixture");
    TiffEncoder::new(BufWriter::new(file)).expect("Failed to create TIF encoder")
}

/// Writes an interleaved 16-bit RGB TIF.
pub fn write_rgb16_tif(path: &Path, width: u32, height: u32, samples: &[u16]) {
    tiff_encoder(path)
        .write_image::<colortype::RGB16>(width, height, samples)
        .expect("Failed to write RGB16 TIF");
}

/// Writes a single-band 8-bit TIF.
pub fn write_gray8_tif(path: &Path, width: u32, height: u32, samples: &[u8]) {
    tiff_encoder(path)
        .write_image::<colortype::Gray8>(width, height, samples)
        .expect("Failed to write Gray8 TIF");
}

/// Writes a single-band signed 32-bit TIF.
pub fn write_gray_i32_tif(path: &Path, width: u32, height: u32, samples: &[i32]) {
    tiff_encoder(path)
        .write_image::<colortype::GrayI32>(width, height, samples)
        .expect("Failed to write GrayI32 TIF");
}

/// Writes a single-band 32-bit float TIF.
pub fn write_gray32f_tif(path: &Path, width: u32, height: u32, samples: &[f32]) {
    tiff_encoder(path)
        .write_image::<colortype::Gray32Float>(width, height, samples)
        .expect("Failed to write Gray32Float TIF");
}

/// Writes a file with a TIF name but no valid TIF content.
pub fn write_corrupt_tif(path: &Path) {
    create_parent(path);
    fs::write(path, b"II*\0this is not a raster").expect("Failed to write corrupt TIF");
}

/// Writes an RGB PNG.
pub fn write_png(path: &Path, image: &RgbImage) {
    create_parent(path);
    image.save(path).expect("Failed to write PNG fixture");
}

/// Writes a solid-color RGB PNG.
pub fn write_solid_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    write_png(path, &RgbImage::from_pixel(width, height, image::Rgb(rgb)));
}
