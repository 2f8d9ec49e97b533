//! Percentile contrast stretching.
//!
//! Each band is clipped to its [1st, 98th] percentile range and rescaled
//! linearly onto 0..=255. Percentiles use linear interpolation between the
//! closest ranks.

/// Lower clip percentile.
pub const LOW_PERCENTILE: f64 = 1.0;

/// Upper clip percentile.
pub const HIGH_PERCENTILE: f64 = 98.0;

/// Compute the `q`-th percentile (0..=100) of an ascending slice.
///
/// Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (q / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(last);
    Some(lerp(sorted[lower], sorted[upper], rank - lower as f64))
}

/// Interpolate from whichever endpoint is closer to keep rounding symmetric.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Clip range for one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStretch {
    pub low: f64,
    pub high: f64,
}

impl ChannelStretch {
    /// Derive the clip range from a band's samples. Every sample takes part,
    /// including any that were zeroed as no-data.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            low: percentile(&sorted, LOW_PERCENTILE)?,
            high: percentile(&sorted, HIGH_PERCENTILE)?,
        })
    }

    /// A band whose percentiles coincide (or are not finite) has no range
    /// to stretch over.
    pub fn is_degenerate(&self) -> bool {
        let range = self.high - self.low;
        !(range.is_finite() && range > 0.0)
    }

    /// Map a sample onto 0..=255, truncating toward zero.
    ///
    /// Degenerate ranges map every sample to 0.
    pub fn apply(&self, value: f64) -> u8 {
        if self.is_degenerate() {
            return 0;
        }
        let clipped = value.max(self.low).min(self.high);
        let scaled = (clipped - self.low) / (self.high - self.low);
        (scaled * 255.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stretch_channel(values: &[f64]) -> Vec<u8> {
        let stretch = ChannelStretch::from_values(values).unwrap();
        values.iter().map(|&v| stretch.apply(v)).collect()
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted: Vec<f64> = (0..=100).map(f64::from).collect();
        assert_eq!(percentile(&sorted, 1.0), Some(1.0));
        assert_eq!(percentile(&sorted, 98.0), Some(98.0));

        let sorted = [10.0, 20.0, 30.0, 40.0];
        // rank = 0.98 * 3 = 2.94 -> 30 + 10 * 0.94
        let p98 = percentile(&sorted, 98.0).unwrap();
        assert!((p98 - 39.4).abs() < 1e-9);
        // rank = 0.01 * 3 = 0.03 -> 10 + 10 * 0.03
        let p1 = percentile(&sorted, 1.0).unwrap();
        assert!((p1 - 10.3).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_edges() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[7.0], 1.0), Some(7.0));
        assert_eq!(percentile(&[1.0, 2.0], 100.0), Some(2.0));
        assert_eq!(percentile(&[1.0, 2.0], 0.0), Some(1.0));
    }

    #[test]
    fn test_apply_clips_to_full_range() {
        let stretch = ChannelStretch { low: 100.0, high: 200.0 };
        assert_eq!(stretch.apply(50.0), 0);
        assert_eq!(stretch.apply(100.0), 0);
        assert_eq!(stretch.apply(150.0), 127);
        assert_eq!(stretch.apply(200.0), 255);
        assert_eq!(stretch.apply(1e9), 255);
    }

    #[test]
    fn test_degenerate_range_maps_to_zero() {
        let values = vec![42.0; 16];
        let stretch = ChannelStretch::from_values(&values).unwrap();
        assert!(stretch.is_degenerate());
        assert_eq!(stretch_channel(&values), vec![0; 16]);
    }

    #[test]
    fn test_stretch_channel_range_invariant() {
        let values: Vec<f64> = (0..1000).map(|i| ((i * 37) % 4096) as f64).collect();
        let stretch = ChannelStretch::from_values(&values).unwrap();
        let out = stretch_channel(&values);

        assert_eq!(out.len(), values.len());
        for (&v, &o) in values.iter().zip(&out) {
            if v <= stretch.low {
                assert_eq!(o, 0);
            }
            if v >= stretch.high {
                assert_eq!(o, 255);
            }
        }
        assert!(out.contains(&0));
        assert!(out.contains(&255));
    }

    #[test]
    fn test_stretch_is_deterministic() {
        let values: Vec<f64> = (0..257).map(|i| (i as f64).sin() * 1000.0).collect();
        assert_eq!(stretch_channel(&values), stretch_channel(&values));
    }
}
