//! TIF raster decoding.
//!
//! Rasters keep the sample type of the source file. Channel count is derived
//! from the decoded buffer length so that gray, gray+alpha, RGB, RGBA and
//! multi-band files all land in the same representation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use num_traits::{AsPrimitive, Zero};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::ColorType;

use crate::error::{ConvertError, Result};

/// Upper bound on decoder buffers; large mosaics are expected.
const DECODING_LIMIT_BYTES: usize = 1024 * 1024 * 1024;

/// Interleaved sample buffer in the source's native type.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Run `$body` with `$buf` bound to the typed buffer inside `$samples`.
macro_rules! with_samples {
    ($samples:expr, $buf:ident => $body:expr) => {
        match $samples {
            Samples::U8($buf) => $body,
            Samples::U16($buf) => $body,
            Samples::U32($buf) => $body,
            Samples::U64($buf) => $body,
            Samples::I8($buf) => $body,
            Samples::I16($buf) => $body,
            Samples::I32($buf) => $body,
            Samples::I64($buf) => $body,
            Samples::F32($buf) => $body,
            Samples::F64($buf) => $body,
        }
    };
}

impl Samples {
    pub fn len(&self) -> usize {
        with_samples!(self, buf => buf.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::F32(_) | Self::F64(_))
    }

    /// Name of the sample type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
        }
    }

    /// Zero every sample equal to `nodata`, in place.
    pub fn mask_value(&mut self, nodata: f64) -> usize {
        with_samples!(self, buf => mask_buffer(buf, nodata))
    }

    /// Copy one channel of an interleaved buffer out as `f64` values.
    pub fn channel_values(&self, channels: usize, channel: usize) -> Vec<f64> {
        with_samples!(self, buf => extract_channel(buf, channels, channel))
    }
}

fn mask_buffer<T>(buf: &mut [T], nodata: f64) -> usize
where
    T: AsPrimitive<f64> + Zero,
{
    let mut masked = 0;
    for sample in buf.iter_mut() {
        if sample.as_() == nodata {
            *sample = T::zero();
            masked += 1;
        }
    }
    masked
}

fn extract_channel<T>(buf: &[T], channels: usize, channel: usize) -> Vec<f64>
where
    T: AsPrimitive<f64>,
{
    buf.iter()
        .skip(channel)
        .step_by(channels.max(1))
        .map(|sample| sample.as_())
        .collect()
}

impl From<DecodingResult> for Samples {
    fn from(result: DecodingResult) -> Self {
        match result {
            DecodingResult::U8(buf) => Self::U8(buf),
            DecodingResult::U16(buf) => Self::U16(buf),
            DecodingResult::U32(buf) => Self::U32(buf),
            DecodingResult::U64(buf) => Self::U64(buf),
            DecodingResult::I8(buf) => Self::I8(buf),
            DecodingResult::I16(buf) => Self::I16(buf),
            DecodingResult::I32(buf) => Self::I32(buf),
            DecodingResult::I64(buf) => Self::I64(buf),
            DecodingResult::F32(buf) => Self::F32(buf),
            DecodingResult::F64(buf) => Self::F64(buf),
        }
    }
}

/// A decoded raster: `height` rows of `width` pixels with `channels`
/// interleaved samples each.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub samples: Samples,
}

impl Raster {
    /// Build a raster, deriving the channel count from the buffer length.
    pub fn new(width: u32, height: u32, samples: Samples) -> Result<Self> {
        let pixels = width as usize * height as usize;
        if pixels == 0 {
            return Err(ConvertError::EmptyRaster { width, height });
        }
        if samples.is_empty() || samples.len() % pixels != 0 {
            return Err(ConvertError::SampleCountMismatch {
                samples: samples.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            channels: samples.len() / pixels,
            samples,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Read the first image of a TIF file.
pub fn read_tif(path: &Path) -> Result<Raster> {
    let file = File::open(path)?;

    let mut limits = Limits::default();
    limits.decoding_buffer_size = DECODING_LIMIT_BYTES;
    limits.ifd_value_size = DECODING_LIMIT_BYTES;
    limits.intermediate_buffer_size = DECODING_LIMIT_BYTES;

    let mut decoder = Decoder::new(BufReader::new(file))?.with_limits(limits);

    let (width, height) = decoder.dimensions()?;
    let color_type = decoder.colortype()?;
    if matches!(color_type, ColorType::Palette(_) | ColorType::CMYK(_)) {
        return Err(ConvertError::UnsupportedColorType(format!("{:?}", color_type)));
    }

    let samples = Samples::from(decoder.read_image()?);
    Raster::new(width, height, samples)
}
