//! Line decoder: sampled voltage waveform back to a bit string.
//!
//! The waveform is cut into consecutive windows of `samples_per_bit`
//! samples. A trailing window shorter than half a bit is dropped rather than
//! guessed at; a trailing window of at least half a bit is decoded from the
//! samples it has. Neither case is an error.
//!
//! These decoders reconstruct ideal, noise-free waveforms produced by
//! [`LineEncoder`](crate::LineEncoder). They are not general line receivers.

#[allow(unused_imports)]
use micromath::F32Ext;
use tracing::{debug, warn};

use crate::analysis::mean;
use crate::config::SamplingConfig;
use crate::encoder::{DIFF_MANCHESTER_IDLE_LEVEL, NRZI_IDLE_LEVEL};
use crate::error::Result;
use crate::types::{BitString, LineCode, Waveform};

/// Level change between NRZ-I windows that counts as a transition.
pub const NRZI_TRANSITION_THRESHOLD: f32 = 0.5;

/// Half-to-half difference that counts as a mid-bit transition.
pub const DIFF_MANCHESTER_THRESHOLD: f32 = 0.5;

/// Absolute window mean above which an AMI window is a mark.
pub const AMI_MARK_THRESHOLD: f32 = 0.1;

/// How much line history the decoder keeps between windows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecoderMode {
    /// Each window is judged on its own samples (plus the previous window's
    /// mean for NRZ-I, seeded with the first sample). The first NRZ-I bit
    /// always decodes as `0` and Differential Manchester reports the
    /// mid-bit transition, which every bit has, so it decodes as all `1`s.
    #[default]
    Memoryless,
    /// The line level is tracked across windows and seeded with the
    /// encoder's idle level, making every scheme an exact inverse.
    LineState,
}

/// Line decoder bound to a sampling grid.
#[derive(Clone, Debug, Default)]
pub struct LineDecoder {
    config: SamplingConfig,
    mode: DecoderMode,
}

impl LineDecoder {
    /// Create a decoder for the given sampling grid.
    pub fn new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            mode: DecoderMode::default(),
        })
    }

    /// Select the decoding mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: DecoderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sampling grid in use.
    #[must_use]
    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Decoding mode in use.
    #[must_use]
    pub const fn mode(&self) -> DecoderMode {
        self.mode
    }

    /// Decode the voltage samples of a waveform.
    pub fn decode_waveform(&self, waveform: &Waveform, line_code: LineCode) -> Result<BitString> {
        if waveform.samples_per_bit() != self.config.samples_per_bit {
            warn!(
                waveform = waveform.samples_per_bit(),
                decoder = self.config.samples_per_bit,
                "samples per bit differ between waveform and decoder"
            );
        }
        self.decode(waveform.voltage(), line_code)
    }

    /// Decode raw voltage samples.
    ///
    /// An empty input decodes to an empty bit string.
    pub fn decode(&self, voltage: &[f32], line_code: LineCode) -> Result<BitString> {
        self.config.validate_for(line_code)?;

        let bits: BitString = match line_code {
            LineCode::NrzL => self.windows(voltage).map(|w| mean(w) > 0.0).collect(),
            LineCode::NrzI => self.decode_nrz_i(voltage),
            LineCode::Manchester => self
                .windows(voltage)
                .map(|w| {
                    let (first, second) = halves(w);
                    first < second
                })
                .collect(),
            LineCode::DifferentialManchester => self.decode_differential_manchester(voltage),
            LineCode::Ami => self
                .windows(voltage)
                .map(|w| mean(w).abs() > AMI_MARK_THRESHOLD)
                .collect(),
        };

        let remainder = voltage.len() % self.config.samples_per_bit;
        if remainder != 0 {
            debug!(
                remainder,
                kept = remainder >= self.config.half_samples(),
                "partial trailing window"
            );
        }
        debug!(%line_code, mode = ?self.mode, bits = bits.len(), "line decoded");
        Ok(bits)
    }

    /// Windows of one bit each, stopping at a trailing window shorter than
    /// half a bit.
    fn windows<'a>(&self, voltage: &'a [f32]) -> impl Iterator<Item = &'a [f32]> {
        let min_len = self.config.half_samples();
        voltage
            .chunks(self.config.samples_per_bit)
            .take_while(move |w| w.len() >= min_len)
    }

    fn decode_nrz_i(&self, voltage: &[f32]) -> BitString {
        let reference = match self.mode {
            DecoderMode::Memoryless => voltage.first().copied().unwrap_or(NRZI_IDLE_LEVEL),
            DecoderMode::LineState => NRZI_IDLE_LEVEL,
        };
        self.windows(voltage)
            .scan(reference, |previous, w| {
                let level = mean(w);
                let bit = (level - *previous).abs() > NRZI_TRANSITION_THRESHOLD;
                *previous = level;
                Some(bit)
            })
            .collect()
    }

    fn decode_differential_manchester(&self, voltage: &[f32]) -> BitString {
        match self.mode {
            DecoderMode::Memoryless => self
                .windows(voltage)
                .map(|w| {
                    let (first, second) = halves(w);
                    (first - second).abs() > DIFF_MANCHESTER_THRESHOLD
                })
                .collect(),
            // A one keeps the level across the bit boundary, a zero flips it.
            DecoderMode::LineState => self
                .windows(voltage)
                .scan(DIFF_MANCHESTER_IDLE_LEVEL, |line, w| {
                    let (first, second) = halves(w);
                    let bit = first * *line > 0.0;
                    *line = second;
                    Some(bit)
                })
                .collect(),
        }
    }
}

/// Means of the first and second half of a window.
fn halves(window: &[f32]) -> (f32, f32) {
    let (first, second) = window.split_at(window.len() / 2);
    (mean(first), mean(second))
}
