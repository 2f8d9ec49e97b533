//! Band normalization: turns a decoded raster into a displayable image.

use image::{DynamicImage, ImageBuffer, RgbImage};
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::raster::{Raster, Samples};
use crate::stretch::ChannelStretch;

const RGB_CHANNELS: usize = 3;

/// Normalize a raster for PNG output.
///
/// Three-band rasters are treated as RGB and percentile-stretched band by
/// band. Any other layout is passed through unchanged, apart from no-data
/// masking, and must already be something PNG can hold. The one exception
/// is single-band integer data wider than 16 bits or signed, which is
/// clamped into 16-bit gray.
pub fn normalize(mut raster: Raster, nodata: Option<f64>) -> Result<DynamicImage> {
    if let Some(nodata) = nodata {
        let masked = raster.samples.mask_value(nodata);
        debug!(nodata, masked, "Masked no-data samples");
    }

    if raster.channels == RGB_CHANNELS {
        stretch_rgb(&raster).map(DynamicImage::ImageRgb8)
    } else {
        passthrough(raster)
    }
}

fn stretch_rgb(raster: &Raster) -> Result<RgbImage> {
    let mut interleaved = vec![0u8; raster.pixel_count() * RGB_CHANNELS];

    for channel in 0..RGB_CHANNELS {
        let values = raster.samples.channel_values(RGB_CHANNELS, channel);
        let stretch = ChannelStretch::from_values(&values).ok_or(ConvertError::EmptyRaster {
            width: raster.width,
            height: raster.height,
        })?;
        debug!(
            channel,
            low = stretch.low,
            high = stretch.high,
            degenerate = stretch.is_degenerate(),
            "Stretching band"
        );

        for (pixel, &value) in interleaved
            .chunks_exact_mut(RGB_CHANNELS)
            .zip(values.iter())
        {
            pixel[channel] = stretch.apply(value);
        }
    }

    ImageBuffer::from_raw(raster.width, raster.height, interleaved).ok_or(
        ConvertError::SampleCountMismatch {
            samples: raster.samples.len(),
            width: raster.width,
            height: raster.height,
        },
    )
}

fn passthrough(raster: Raster) -> Result<DynamicImage> {
    let Raster {
        width,
        height,
        channels,
        samples,
    } = raster;
    let samples_len = samples.len();
    let sample_type = samples.type_name();

    let image = match (channels, samples) {
        (1, Samples::U8(buf)) => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLuma8),
        (1, Samples::U16(buf)) => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLuma16),
        (2, Samples::U8(buf)) => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLumaA8),
        (2, Samples::U16(buf)) => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageLumaA16),
        (4, Samples::U8(buf)) => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageRgba8),
        (4, Samples::U16(buf)) => ImageBuffer::from_raw(width, height, buf).map(DynamicImage::ImageRgba16),
        (1, samples) if samples.is_integer() => {
            ImageBuffer::from_raw(width, height, clamp_to_u16(&samples)).map(DynamicImage::ImageLuma16)
        }
        _ => {
            return Err(ConvertError::UnsupportedLayout {
                channels,
                sample_type,
            })
        }
    };

    image.ok_or(ConvertError::SampleCountMismatch {
        samples: samples_len,
        width,
        height,
    })
}

/// Clamp integer samples into 0..=65535; negatives become 0.
fn clamp_to_u16(samples: &Samples) -> Vec<u16> {
    samples
        .channel_values(1, 0)
        .into_iter()
        .map(|value| value.clamp(0.0, f64::from(u16::MAX)) as u16)
        .collect()
}
