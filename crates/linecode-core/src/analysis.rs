//! Waveform statistics and decode fidelity.

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::types::BitString;

/// Arithmetic mean, `0.0` for an empty slice.
#[must_use]
pub fn mean(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

/// Summary statistics of a voltage sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveformStats {
    /// Mean level (DC component)
    pub mean: f32,
    /// Population standard deviation
    pub std_dev: f32,
    /// Smallest sample
    pub min: f32,
    /// Largest sample
    pub max: f32,
}

impl WaveformStats {
    /// Compute statistics; all zero for an empty slice.
    #[must_use]
    pub fn of(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let mean = mean(samples);
        let variance = samples
            .iter()
            .map(|s| (s - mean) * (s - mean))
            .sum::<f32>()
            / samples.len() as f32;
        let (min, max) = samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Bit-by-bit comparison of a decoded string against the original.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Positions where both strings agree (over the shorter length)
    pub matched: usize,
    /// Length of the original
    pub total: usize,
    /// Length of the decoded string
    pub decoded_len: usize,
}

impl DecodeReport {
    /// Compare `decoded` against `original`.
    #[must_use]
    pub fn compare(original: &BitString, decoded: &BitString) -> Self {
        let matched = original
            .iter()
            .zip(decoded.iter())
            .filter(|(a, b)| a == b)
            .count();
        Self {
            matched,
            total: original.len(),
            decoded_len: decoded.len(),
        }
    }

    /// Matched share of the original, in percent.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.matched as f32 * 100.0 / self.total as f32
    }

    /// Whether the decoded string reproduces the original exactly.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.matched == self.total && self.decoded_len == self.total
    }
}
