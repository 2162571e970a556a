//! Analog test signals for the modulators.

use alloc::vec::Vec;
use core::f32::consts::{PI, TAU};
use core::fmt;
use core::str::FromStr;

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::error::{CodecError, Result};
use crate::types::normalize_key;

/// Number of points in a generated test signal.
pub const DEFAULT_SOURCE_SAMPLES: usize = 50;

/// One period of a reference waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnalogSource {
    /// `sin t`
    #[default]
    Sine,
    /// `cos t`
    Cosine,
    /// `sign(sin t)`, zero where the sine is zero
    Square,
}

impl AnalogSource {
    /// All sources.
    pub const ALL: [Self; 3] = [Self::Sine, Self::Cosine, Self::Square];

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sine => "Sine",
            Self::Cosine => "Cosine",
            Self::Square => "Square",
        }
    }

    /// Value at phase `t` radians.
    #[must_use]
    pub fn value(self, t: f32) -> f32 {
        match self {
            Self::Sine => t.sin(),
            Self::Cosine => t.cos(),
            // Decided on the phase so the zero crossings are exact.
            Self::Square => {
                let mut phase = t % TAU;
                if phase < 0.0 {
                    phase += TAU;
                }
                if phase == 0.0 || phase == PI {
                    0.0
                } else if phase < PI {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }

    /// `n` evenly spaced points over `[0, 2π]`, both ends included.
    ///
    /// A single point is taken at `t = 0`.
    #[must_use]
    pub fn samples(self, n: usize) -> Vec<f32> {
        let step = if n > 1 { TAU / (n - 1) as f32 } else { 0.0 };
        (0..n).map(|k| self.value(k as f32 * step)).collect()
    }
}

impl fmt::Display for AnalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalogSource {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_key(s)?.as_str() {
            "sine" | "sin" => Ok(Self::Sine),
            "cosine" | "cos" => Ok(Self::Cosine),
            "square" => Ok(Self::Square),
            _ => Err(CodecError::UnknownScheme),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AnalogSource {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}
