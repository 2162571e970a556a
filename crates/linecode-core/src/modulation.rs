//! Analog-to-digital modulation: PCM quantization and delta modulation.

use alloc::vec::Vec;
use tracing::debug;

use crate::config::{DeltaConfig, PcmConfig};
use crate::error::{ensure_finite, CodecError, Result};
use crate::types::BitString;

/// Added to the normalisation range so a constant signal does not divide by
/// zero.
pub const PCM_RANGE_EPSILON: f64 = 1e-10;

/// Minimum number of samples PCM needs to establish a range.
pub const PCM_MIN_SAMPLES: usize = 2;

/// Uniform PCM quantizer.
///
/// Samples are normalised to `[0, 1]` against the global minimum and maximum
/// of the whole sequence, then mapped to `floor(x * (2^n - 1))`. The range is
/// widened by [`PCM_RANGE_EPSILON`], so the maximum sample lands just below
/// the top code rather than on it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcmModulator {
    config: PcmConfig,
}

impl PcmModulator {
    /// Create a quantizer.
    pub fn new(config: PcmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Quantizer settings.
    #[must_use]
    pub const fn config(&self) -> &PcmConfig {
        &self.config
    }

    /// Quantize each sample to its integer code.
    pub fn quantize(&self, samples: &[f32]) -> Result<Vec<u32>> {
        if samples.len() < PCM_MIN_SAMPLES {
            return Err(CodecError::insufficient_samples(PCM_MIN_SAMPLES, samples.len()));
        }
        ensure_finite(samples)?;

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(f64::from(s)), hi.max(f64::from(s)))
            });
        let range = max - min + PCM_RANGE_EPSILON;
        let top = self.config.max_code();

        // Normalised values are non-negative, so truncation is floor.
        Ok(samples
            .iter()
            .map(|&s| {
                let normalized = (f64::from(s) - min) / range;
                ((normalized * f64::from(top)) as u32).min(top)
            })
            .collect())
    }

    /// Quantize and emit each code as a fixed-width, MSB-first bit group.
    pub fn encode(&self, samples: &[f32]) -> Result<BitString> {
        let codes = self.quantize(samples)?;
        let width = u32::from(self.config.bit_depth);
        let bits: BitString = codes
            .iter()
            .flat_map(|&code| (0..width).rev().map(move |b| (code >> b) & 1 == 1))
            .collect();
        debug!(
            samples = samples.len(),
            bit_depth = self.config.bit_depth,
            bits = bits.len(),
            "pcm encoded"
        );
        Ok(bits)
    }

    /// Split a PCM bit stream back into codes.
    pub fn codes(&self, bits: &BitString) -> Result<Vec<u32>> {
        let width = usize::from(self.config.bit_depth);
        if bits.len() % width != 0 {
            return Err(CodecError::CodeLengthMismatch {
                length: bits.len(),
                bit_depth: self.config.bit_depth,
            });
        }
        Ok(bits
            .as_slice()
            .chunks_exact(width)
            .map(|group| group.iter().fold(0u32, |acc, &b| (acc << 1) | u32::from(b)))
            .collect())
    }

    /// Reconstruct normalised levels in `[0, 1]` from a PCM bit stream.
    ///
    /// The original amplitude range is not recoverable from the codes.
    pub fn decode(&self, bits: &BitString) -> Result<Vec<f32>> {
        let top = self.config.max_code() as f32;
        Ok(self
            .codes(bits)?
            .into_iter()
            .map(|code| code as f32 / top)
            .collect())
    }
}

/// One-bit predictive (delta) modulator.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeltaModulator {
    config: DeltaConfig,
}

impl DeltaModulator {
    /// Create a delta modulator.
    pub fn new(config: DeltaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Modulator settings.
    #[must_use]
    pub const fn config(&self) -> &DeltaConfig {
        &self.config
    }

    /// Emit one bit per sample: `1` when the sample is above the running
    /// approximation (which then steps up), `0` otherwise (steps down).
    ///
    /// The approximation starts at the first sample, so the first bit is
    /// always `0`.
    pub fn encode(&self, samples: &[f32]) -> Result<BitString> {
        let first = *samples
            .first()
            .ok_or(CodecError::insufficient_samples(1, 0))?;
        ensure_finite(samples)?;

        let step = f64::from(self.config.step);
        let bits: BitString = samples
            .iter()
            .scan(f64::from(first), |approximation, &s| {
                let up = f64::from(s) > *approximation;
                *approximation += if up { step } else { -step };
                Some(up)
            })
            .collect();
        debug!(samples = samples.len(), step = self.config.step, "delta modulated");
        Ok(bits)
    }

    /// Rebuild the staircase approximation from a bit stream.
    ///
    /// Element `k` is the value sample `k` was compared against, so with the
    /// right `initial` value this reproduces the encoder's track exactly.
    #[must_use]
    pub fn decode(&self, bits: &BitString, initial: f32) -> Vec<f32> {
        let step = f64::from(self.config.step);
        bits.iter()
            .scan(f64::from(initial), |approximation, up| {
                let current = *approximation as f32;
                *approximation += if up { step } else { -step };
                Some(current)
            })
            .collect()
    }
}
