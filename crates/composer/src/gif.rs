//! Animated GIF encoding.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};

use crate::error::{ComposeError, Result};

/// NeuQuant sampling factor: 1 is slowest and best, 30 is fastest.
const QUANTIZE_SPEED: i32 = 10;

/// Encode `frames` in order, each shown for `duration_ms`.
///
/// With `repeat` the animation loops forever; without it the file carries
/// no loop extension and viewers play it once.
pub fn encode_gif(frames: Vec<RgbImage>, path: &Path, duration_ms: u32, repeat: bool) -> Result<()> {
    let encode_err = |source| ComposeError::EncodeGif {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| ComposeError::CreateGif {
        path: path.to_path_buf(),
        source,
    })?;

    let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), QUANTIZE_SPEED);
    if repeat {
        encoder.set_repeat(Repeat::Infinite).map_err(encode_err)?;
    }

    let delay = Delay::from_numer_denom_ms(duration_ms, 1);
    let frames = frames
        .into_iter()
        .map(|rgb| Frame::from_parts(DynamicImage::ImageRgb8(rgb).into_rgba8(), 0, 0, delay));

    encoder.encode_frames(frames).map_err(encode_err)
}
