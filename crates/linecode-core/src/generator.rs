//! End-to-end signal generation pipeline.
//!
//! A [`SignalRequest`] names a digital bit string, or an analog source plus a
//! modulator. [`SignalGenerator::generate`] turns it into a line-coded
//! waveform together with the artifacts shown alongside it:
//!
//! ```text
//! digital bits ─────────────────────┐
//!                                   ├─> LineEncoder ─> Waveform, stats
//! analog source ─> PCM / DM ─> bits ┘        │
//!                                            ├─> palindrome of the bits
//!                                            └─> scrambled bits (AMI only)
//! ```
//!
//! [`SignalGenerator::verify`] decodes the waveform again and compares.

use tracing::debug;

use crate::analysis::{DecodeReport, WaveformStats};
use crate::config::{DeltaConfig, PcmConfig, SamplingConfig, DEFAULT_PCM_BIT_DEPTH};
use crate::decoder::{DecoderMode, LineDecoder};
use crate::encoder::LineEncoder;
use crate::error::Result;
use crate::modulation::{DeltaModulator, PcmModulator};
use crate::palindrome::{find_longest_palindrome_bits, Palindrome};
use crate::scrambler::{scramble, ScrambledBitString, Scrambling};
use crate::source::{AnalogSource, DEFAULT_SOURCE_SAMPLES};
use crate::types::{BitString, LineCode, Waveform};

/// Delta step used for analog sources unless the request says otherwise.
pub const DEFAULT_ANALOG_DELTA_STEP: f32 = 0.15;

/// Pipeline settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Grid shared by the encoder and the verifying decoder
    pub sampling: SamplingConfig,
    /// Decoder used by [`SignalGenerator::verify`]
    pub decoder_mode: DecoderMode,
    /// Points taken from an analog source
    pub source_samples: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            decoder_mode: DecoderMode::default(),
            source_samples: DEFAULT_SOURCE_SAMPLES,
        }
    }
}

/// Analog-to-digital conversion applied to an analog source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Modulation {
    /// Pulse code modulation with the given code width
    Pcm {
        /// Bits per sample
        bit_depth: u8,
    },
    /// Delta modulation with the given step
    Delta {
        /// Staircase step size
        step: f32,
    },
}

impl Default for Modulation {
    fn default() -> Self {
        Self::Pcm {
            bit_depth: DEFAULT_PCM_BIT_DEPTH,
        }
    }
}

impl Modulation {
    /// Delta modulation with [`DEFAULT_ANALOG_DELTA_STEP`].
    #[must_use]
    pub const fn delta() -> Self {
        Self::Delta {
            step: DEFAULT_ANALOG_DELTA_STEP,
        }
    }

    /// Digitise `samples`.
    pub fn modulate(self, samples: &[f32]) -> Result<BitString> {
        match self {
            Self::Pcm { bit_depth } => {
                PcmModulator::new(PcmConfig::new(bit_depth)?)?.encode(samples)
            }
            Self::Delta { step } => DeltaModulator::new(DeltaConfig::new(step)?)?.encode(samples),
        }
    }
}

/// Where the bits of a request come from.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// Bits supplied directly
    Digital(BitString),
    /// Bits produced by modulating a test signal
    Analog {
        /// Test signal
        source: AnalogSource,
        /// Modulator
        modulation: Modulation,
    },
}

/// One generation request.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalRequest {
    /// Bit source
    pub input: Input,
    /// Line code for the waveform
    pub line_code: LineCode,
    /// Scrambling to display; only honoured for AMI
    pub scrambling: Option<Scrambling>,
}

impl SignalRequest {
    /// Line code a bit string directly.
    #[must_use]
    pub const fn digital(bits: BitString, line_code: LineCode) -> Self {
        Self {
            input: Input::Digital(bits),
            line_code,
            scrambling: None,
        }
    }

    /// Modulate a test signal, then line code the result.
    #[must_use]
    pub const fn analog(source: AnalogSource, modulation: Modulation, line_code: LineCode) -> Self {
        Self {
            input: Input::Analog { source, modulation },
            line_code,
            scrambling: None,
        }
    }

    /// Also scramble the bits.
    #[must_use]
    pub const fn with_scrambling(mut self, scheme: Scrambling) -> Self {
        self.scrambling = Some(scheme);
        self
    }
}

/// Everything produced for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    /// Bits that were line coded
    pub bits: BitString,
    /// Line code used
    pub line_code: LineCode,
    /// Encoded waveform
    pub waveform: Waveform,
    /// Longest palindromic run of `bits`
    pub palindrome: Palindrome,
    /// Scrambled `bits`, when requested for an AMI waveform
    pub scrambled: Option<ScrambledBitString>,
    /// Voltage statistics of `waveform`
    pub stats: WaveformStats,
}

/// Runs requests through modulation, line coding and the reporting steps.
#[derive(Clone, Debug)]
pub struct SignalGenerator {
    config: GeneratorConfig,
    encoder: LineEncoder,
    decoder: LineDecoder,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
            encoder: LineEncoder::default(),
            decoder: LineDecoder::default(),
        }
    }
}

impl SignalGenerator {
    /// Create a generator.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Ok(Self {
            encoder: LineEncoder::new(config.sampling)?,
            decoder: LineDecoder::new(config.sampling)?.with_mode(config.decoder_mode),
            config,
        })
    }

    /// Pipeline settings.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce the bits of a request.
    pub fn bits(&self, input: &Input) -> Result<BitString> {
        match input {
            Input::Digital(bits) => Ok(bits.clone()),
            Input::Analog { source, modulation } => {
                modulation.modulate(&source.samples(self.config.source_samples))
            }
        }
    }

    /// Run a request.
    ///
    /// # Errors
    /// Anything the modulator or the line encoder rejects. Nothing is
    /// produced on error.
    pub fn generate(&self, request: &SignalRequest) -> Result<Generation> {
        let bits = self.bits(&request.input)?;
        let waveform = self.encoder.encode(&bits, request.line_code)?;

        let scrambled = match request.scrambling {
            Some(scheme) if request.line_code == LineCode::Ami => Some(scramble(&bits, scheme)),
            Some(scheme) => {
                debug!(
                    %scheme,
                    line_code = %request.line_code,
                    "scrambling skipped for non-AMI code"
                );
                None
            }
            None => None,
        };

        let palindrome = find_longest_palindrome_bits(&bits);
        let stats = WaveformStats::of(waveform.voltage());
        debug!(
            line_code = %request.line_code,
            bits = %bits.preview(),
            palindrome_len = palindrome.length,
            "signal generated"
        );

        Ok(Generation {
            bits,
            line_code: request.line_code,
            waveform,
            palindrome,
            scrambled,
            stats,
        })
    }

    /// Decode a generation's waveform and compare it with its bits.
    pub fn verify(&self, generation: &Generation) -> Result<DecodeReport> {
        let decoded = self
            .decoder
            .decode_waveform(&generation.waveform, generation.line_code)?;
        let report = DecodeReport::compare(&generation.bits, &decoded);
        debug!(
            matched = report.matched,
            total = report.total,
            exact = report.is_exact(),
            "decode verified"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn small_generator(decoder_mode: DecoderMode) -> SignalGenerator {
        SignalGenerator::new(GeneratorConfig {
            sampling: SamplingConfig::new(10).unwrap(),
            decoder_mode,
            ..GeneratorConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_digital_generation() {
        let bits: BitString = "1100100100110".parse().unwrap();
        let generation = small_generator(DecoderMode::Memoryless)
            .generate(&SignalRequest::digital(bits.clone(), LineCode::NrzL))
            .unwrap();
        assert_eq!(generation.bits, bits);
        assert_eq!(generation.waveform.len(), 130);
        assert_eq!(generation.palindrome.length, 12);
        assert!(generation.scrambled.is_none());
        assert_eq!(generation.stats.max, 1.0);
        assert_eq!(generation.stats.min, -1.0);
    }

    #[test]
    fn test_scrambling_only_for_ami() {
        let generator = small_generator(DecoderMode::Memoryless);
        let bits: BitString = "100000000".parse().unwrap();

        let ami = generator
            .generate(
                &SignalRequest::digital(bits.clone(), LineCode::Ami)
                    .with_scrambling(Scrambling::B8zs),
            )
            .unwrap();
        assert_eq!(ami.scrambled.unwrap().to_string(), "1000VB0VB");

        let nrz = generator
            .generate(
                &SignalRequest::digital(bits, LineCode::NrzL).with_scrambling(Scrambling::B8zs),
            )
            .unwrap();
        assert!(nrz.scrambled.is_none());
    }

    #[test]
    fn test_analog_pcm_bit_count() {
        let generation = small_generator(DecoderMode::Memoryless)
            .generate(&SignalRequest::analog(
                AnalogSource::Sine,
                Modulation::default(),
                LineCode::Manchester,
            ))
            .unwrap();
        assert_eq!(generation.bits.len(), DEFAULT_SOURCE_SAMPLES * 8);
    }

    #[test]
    fn test_analog_delta_bit_count() {
        let generation = small_generator(DecoderMode::Memoryless)
            .generate(&SignalRequest::analog(
                AnalogSource::Cosine,
                Modulation::delta(),
                LineCode::Ami,
            ))
            .unwrap();
        assert_eq!(generation.bits.len(), DEFAULT_SOURCE_SAMPLES);
    }

    #[test]
    fn test_empty_digital_input_rejected() {
        let err = small_generator(DecoderMode::Memoryless)
            .generate(&SignalRequest::digital(BitString::default(), LineCode::NrzL))
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_modulation_rejected() {
        let err = small_generator(DecoderMode::Memoryless)
            .generate(&SignalRequest::analog(
                AnalogSource::Sine,
                Modulation::Pcm { bit_depth: 0 },
                LineCode::NrzL,
            ))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_verify_line_state_is_exact() {
        let generator = small_generator(DecoderMode::LineState);
        let bits: BitString = "0110100011".parse().unwrap();
        for code in LineCode::ALL {
            let generation = generator
                .generate(&SignalRequest::digital(bits.clone(), code))
                .unwrap();
            assert!(generator.verify(&generation).unwrap().is_exact(), "{code}");
        }
    }

    #[test]
    fn test_verify_memoryless_nrz_i_misses_first_mark() {
        let generator = small_generator(DecoderMode::Memoryless);
        let bits: BitString = "1010".parse().unwrap();
        let generation = generator.generate(&SignalRequest::digital(bits, LineCode::NrzI)).unwrap();
        let report = generator.verify(&generation).unwrap();
        assert_eq!(report.matched, 3);
        assert_eq!(report.accuracy(), 75.0);
    }
}
