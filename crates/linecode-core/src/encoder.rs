//! Line encoder: bit string to sampled voltage waveform.
//!
//! Each scheme is a fold over the bits with a call-local accumulator (the
//! current line level or the polarity of the last mark). Nothing is carried
//! between calls.

use alloc::vec::Vec;
use tracing::{debug, trace};

use crate::config::SamplingConfig;
use crate::error::Result;
use crate::sampler::{Half, Sampler};
use crate::types::{BitString, LineCode, Waveform};

/// Positive line level.
pub const HIGH: f32 = 1.0;
/// Zero line level (AMI space).
pub const ZERO: f32 = 0.0;
/// Negative line level.
pub const LOW: f32 = -1.0;

/// NRZ-I line level before the first bit.
pub const NRZI_IDLE_LEVEL: f32 = LOW;
/// Differential Manchester line level before the first bit.
pub const DIFF_MANCHESTER_IDLE_LEVEL: f32 = HIGH;
/// AMI polarity of the mark preceding the first bit.
pub const AMI_INITIAL_MARK: f32 = LOW;

/// Voltage pattern of one bit interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BitLevels {
    /// Constant level across the whole bit
    Full(f32),
    /// One level per half of the bit
    Split(f32, f32),
}

impl BitLevels {
    /// Level at the start of the bit.
    #[must_use]
    pub const fn start(self) -> f32 {
        match self {
            Self::Full(level) | Self::Split(level, _) => level,
        }
    }

    /// Level at the end of the bit.
    #[must_use]
    pub const fn end(self) -> f32 {
        match self {
            Self::Full(level) | Self::Split(_, level) => level,
        }
    }
}

/// Map each bit to its voltage pattern under `line_code`.
#[must_use]
pub fn bit_levels(bits: &BitString, line_code: LineCode) -> Vec<BitLevels> {
    match line_code {
        LineCode::NrzL => bits
            .iter()
            .map(|bit| BitLevels::Full(if bit { HIGH } else { LOW }))
            .collect(),
        LineCode::NrzI => bits
            .iter()
            .scan(NRZI_IDLE_LEVEL, |level, bit| {
                if bit {
                    *level = -*level;
                }
                Some(BitLevels::Full(*level))
            })
            .collect(),
        LineCode::Manchester => bits
            .iter()
            .map(|bit| {
                if bit {
                    BitLevels::Split(LOW, HIGH)
                } else {
                    BitLevels::Split(HIGH, LOW)
                }
            })
            .collect(),
        LineCode::DifferentialManchester => bits
            .iter()
            .scan(DIFF_MANCHESTER_IDLE_LEVEL, |level, bit| {
                // A zero adds a transition at the bit boundary.
                if !bit {
                    *level = -*level;
                }
                let first = *level;
                *level = -*level;
                Some(BitLevels::Split(first, *level))
            })
            .collect(),
        LineCode::Ami => bits
            .iter()
            .scan(AMI_INITIAL_MARK, |last_mark, bit| {
                if bit {
                    *last_mark = -*last_mark;
                    Some(BitLevels::Full(*last_mark))
                } else {
                    Some(BitLevels::Full(ZERO))
                }
            })
            .collect(),
    }
}

/// Line encoder bound to a sampling grid.
#[derive(Clone, Debug)]
pub struct LineEncoder {
    config: SamplingConfig,
    sampler: Sampler,
}

impl Default for LineEncoder {
    fn default() -> Self {
        let config = SamplingConfig::default();
        Self {
            sampler: Sampler::new(&config),
            config,
        }
    }
}

impl LineEncoder {
    /// Create an encoder for the given sampling grid.
    pub fn new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: Sampler::new(&config),
            config,
        })
    }

    /// Sampling grid in use.
    #[must_use]
    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Encode `bits` into a waveform.
    ///
    /// # Errors
    /// [`CodecError::EmptyBitString`](crate::CodecError::EmptyBitString) for
    /// an empty input, and a configuration error when the sampling grid
    /// cannot represent `line_code`.
    pub fn encode(&self, bits: &BitString, line_code: LineCode) -> Result<Waveform> {
        bits.ensure_non_empty()?;
        self.config.validate_for(line_code)?;

        let mut waveform = Waveform::try_with_capacity(bits.len(), self.config.samples_per_bit)?;
        for (index, levels) in bit_levels(bits, line_code).into_iter().enumerate() {
            match levels {
                BitLevels::Full(level) => {
                    waveform.push_segment(self.sampler.bit_times(index), level);
                }
                BitLevels::Split(first, second) => {
                    waveform.push_segment(self.sampler.half_times(index, Half::First), first);
                    waveform.push_segment(self.sampler.half_times(index, Half::Second), second);
                }
            }
            trace!(index, ?levels, "encoded bit");
        }

        debug!(
            %line_code,
            bits = bits.len(),
            samples = waveform.len(),
            "line encoded"
        );
        Ok(waveform)
    }
}
