//! Sampling and modulation configuration.
//!
//! Configuration values are validated when constructed through `new`; the
//! `Default` impls are always valid.

use crate::error::{CodecError, Result};
use crate::types::LineCode;

/// Default number of samples per bit interval.
pub const DEFAULT_SAMPLES_PER_BIT: usize = 100;

/// Default duration of one bit interval (time units).
pub const DEFAULT_BIT_DURATION: f32 = 1.0;

/// Default PCM code width.
pub const DEFAULT_PCM_BIT_DEPTH: u8 = 8;

/// Smallest PCM code width.
pub const MIN_PCM_BIT_DEPTH: u8 = 1;

/// Largest PCM code width (f32 mantissa keeps every level exact).
pub const MAX_PCM_BIT_DEPTH: u8 = 16;

/// Default delta modulation step.
pub const DEFAULT_DELTA_STEP: f32 = 0.1;

/// Sampling grid shared by the line encoder and decoder.
///
/// Encode and decode must agree on `samples_per_bit` for a round trip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    /// Samples per bit interval
    pub samples_per_bit: usize,
    /// Duration of one bit interval
    pub bit_duration: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples_per_bit: DEFAULT_SAMPLES_PER_BIT,
            bit_duration: DEFAULT_BIT_DURATION,
        }
    }
}

impl SamplingConfig {
    /// Create a validated configuration with the default bit duration.
    pub fn new(samples_per_bit: usize) -> Result<Self> {
        let config = Self {
            samples_per_bit,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the bit duration.
    pub fn with_bit_duration(self, bit_duration: f32) -> Result<Self> {
        let config = Self {
            bit_duration,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the scheme independent constraints.
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_bit == 0 {
            return Err(CodecError::InvalidSamplesPerBit);
        }
        if !self.bit_duration.is_finite() || self.bit_duration <= 0.0 {
            return Err(CodecError::InvalidBitDuration(self.bit_duration));
        }
        Ok(())
    }

    /// Check the constraints for a particular scheme.
    ///
    /// Split-phase codes need two equal halves, so `samples_per_bit` must be
    /// even for them.
    pub fn validate_for(&self, line_code: LineCode) -> Result<()> {
        self.validate()?;
        if line_code.is_split_phase() && self.samples_per_bit % 2 != 0 {
            return Err(CodecError::OddSamplesPerBit {
                samples_per_bit: self.samples_per_bit,
                line_code,
            });
        }
        Ok(())
    }

    /// Samples in each half of a split-phase bit.
    #[must_use]
    pub const fn half_samples(&self) -> usize {
        self.samples_per_bit / 2
    }

    /// Time between consecutive samples.
    #[must_use]
    pub fn sample_period(&self) -> f64 {
        f64::from(self.bit_duration) / self.samples_per_bit as f64
    }
}

/// PCM quantizer settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcmConfig {
    /// Code width in bits
    pub bit_depth: u8,
}

impl Default for PcmConfig {
    fn default() -> Self {
        Self {
            bit_depth: DEFAULT_PCM_BIT_DEPTH,
        }
    }
}

impl PcmConfig {
    /// Create a validated configuration.
    pub fn new(bit_depth: u8) -> Result<Self> {
        let config = Self { bit_depth };
        config.validate()?;
        Ok(config)
    }

    /// Check the bit depth range.
    pub fn validate(&self) -> Result<()> {
        if (MIN_PCM_BIT_DEPTH..=MAX_PCM_BIT_DEPTH).contains(&self.bit_depth) {
            Ok(())
        } else {
            Err(CodecError::InvalidBitDepth {
                bit_depth: self.bit_depth,
                min: MIN_PCM_BIT_DEPTH,
                max: MAX_PCM_BIT_DEPTH,
            })
        }
    }

    /// Number of quantization levels (`2^n`).
    #[must_use]
    pub const fn levels(&self) -> u32 {
        1 << self.bit_depth
    }

    /// Largest code value (`2^n - 1`).
    #[must_use]
    pub const fn max_code(&self) -> u32 {
        self.levels() - 1
    }
}

/// Delta modulator settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaConfig {
    /// Approximation step per sample
    pub step: f32,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_DELTA_STEP,
        }
    }
}

impl DeltaConfig {
    /// Create a validated configuration.
    pub fn new(step: f32) -> Result<Self> {
        let config = Self { step };
        config.validate()?;
        Ok(config)
    }

    /// Check that the step is usable.
    pub fn validate(&self) -> Result<()> {
        if self.step.is_finite() && self.step > 0.0 {
            Ok(())
        } else {
            Err(CodecError::InvalidStepSize(self.step))
        }
    }
}
