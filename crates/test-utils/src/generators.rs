//! Test data generators for creating synthetic raster data.
//!
//! These generators create predictable, verifiable sample patterns in
//! interleaved row-major order.

/// Creates an interleaved 3-band raster with predictable values.
///
/// For the pixel at (`col`, `row`):
/// - red = `col * 1000 + row`
/// - green = `row * 1000 + col`
/// - blue = `(col + row) * 500`
///
/// # Example
///
/// ```
/// use test_utils::create_test_rgb16;
///
/// let samples = create_test_rgb16(4, 2);
/// assert_eq!(samples.len(), 4 * 2 * 3);
/// assert_eq!(&samples[3..6], &[1000, 1, 500]); // col=1, row=0
/// ```
pub fn create_test_rgb16(width: usize, height: usize) -> Vec<u16> {
    let mut data = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as u16);
            data.push((row * 1000 + col) as u16);
            data.push(((col + row) * 500) as u16);
        }
    }
    data
}

/// Creates an interleaved 3-band raster where every sample equals `value`.
pub fn create_constant_rgb16(width: usize, height: usize, value: u16) -> Vec<u16> {
    vec![value; width * height * 3]
}

/// Creates a single-band 8-bit ramp from 0 (top-left) to 255 (bottom-right).
pub fn create_gray8_ramp(width: usize, height: usize) -> Vec<u8> {
    let last = (width * height).saturating_sub(1).max(1);
    (0..width * height)
        .map(|i| (i * 255 / last) as u8)
        .collect()
}

/// Replaces every `every`-th pixel (all three bands) with `nodata`.
///
/// Returns the indices of the replaced pixels.
pub fn insert_nodata_rgb16(samples: &mut [u16], every: usize, nodata: u16) -> Vec<usize> {
    let mut replaced = Vec::new();
    for (i, pixel) in samples.chunks_exact_mut(3).enumerate() {
        if every > 0 && i % every == 0 {
            pixel.fill(nodata);
            replaced.push(i);
        }
    }
    replaced
}
