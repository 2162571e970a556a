//! Sample time grid for bit and half-bit intervals.

use crate::config::SamplingConfig;

/// Which half of a split-phase bit interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Half {
    /// Start of the bit up to mid-bit
    First,
    /// Mid-bit up to the end of the bit
    Second,
}

/// Evenly spaced, left-closed sample times over bit intervals.
///
/// Times are kept in `f64` and computed from the absolute sample ordinal, so
/// the axis stays strictly increasing and evenly spaced for any waveform that
/// fits in memory.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    samples_per_bit: usize,
    bit_duration: f64,
    period: f64,
}

impl Sampler {
    /// Create a sampler for the given grid.
    #[must_use]
    pub fn new(config: &SamplingConfig) -> Self {
        Self {
            samples_per_bit: config.samples_per_bit,
            bit_duration: f64::from(config.bit_duration),
            period: config.sample_period(),
        }
    }

    /// Time at which bit `index` starts.
    #[must_use]
    pub fn bit_start(&self, index: usize) -> f64 {
        index as f64 * self.bit_duration
    }

    /// `samples_per_bit` sample times covering `[start, start + duration)`.
    pub fn bit_times(&self, index: usize) -> impl Iterator<Item = f64> {
        self.run(index, 0, self.samples_per_bit)
    }

    /// `samples_per_bit / 2` sample times covering one half of bit `index`.
    pub fn half_times(&self, index: usize, half: Half) -> impl Iterator<Item = f64> {
        let half_len = self.samples_per_bit / 2;
        let offset = match half {
            Half::First => 0,
            Half::Second => half_len,
        };
        self.run(index, offset, half_len)
    }

    fn run(&self, index: usize, offset: usize, count: usize) -> impl Iterator<Item = f64> {
        // Ordinals are whole numbers, exact in f64 up to 2^53.
        let first = index as f64 * self.samples_per_bit as f64 + offset as f64;
        let period = self.period;
        (0..count).map(move |k| (first + k as f64) * period)
    }
}
