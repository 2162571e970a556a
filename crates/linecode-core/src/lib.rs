//! Line Code Core Library
//!
//! Digital line coding primitives: NRZ-L, NRZ-I, Manchester, Differential
//! Manchester and AMI encoders with matching decoders, PCM and delta
//! modulation of analog signals, B8ZS / HDB3 zero-run scrambling and a
//! longest-palindrome search over bit strings.
//! This crate is `no_std` compatible (it needs `alloc`) for use in both
//! embedded and WASM targets.
//!
//! # Modules
//!
//! - [`types`] - Core types: BitString, Waveform, LineCode
//! - [`config`] - Sampling grid and modulator settings
//! - [`sampler`] - Time axis of a bit interval
//! - [`encoder`] - Bit string to sampled waveform
//! - [`decoder`] - Sampled waveform back to a bit string
//! - [`modulation`] - PCM quantizer and delta modulator
//! - [`scrambler`] - B8ZS and HDB3 substitution
//! - [`palindrome`] - Manacher longest-palindrome search
//! - [`source`] - Sine, cosine and square test signals
//! - [`analysis`] - Waveform statistics and decode accuracy
//! - [`generator`] - End-to-end generation pipeline
//! - [`error`] - Error type
//!
//! # Example
//!
//! ```
//! use linecode_core::{decode, encode, BitString, LineCode};
//!
//! let bits: BitString = "1011".parse()?;
//! let waveform = encode(&bits, LineCode::Manchester)?;
//! assert_eq!(waveform.len(), 400);
//!
//! let decoded = decode(waveform.voltage(), LineCode::Manchester, 100)?;
//! assert_eq!(decoded, bits);
//! # Ok::<(), linecode_core::CodecError>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod analysis;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod modulation;
pub mod palindrome;
pub mod sampler;
pub mod scrambler;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use analysis::{DecodeReport, WaveformStats};
pub use config::{DeltaConfig, PcmConfig, SamplingConfig};
pub use decoder::{DecoderMode, LineDecoder};
pub use encoder::LineEncoder;
pub use error::{CodecError, ErrorKind, Result};
pub use generator::{
    Generation, GeneratorConfig, Input, Modulation, SignalGenerator, SignalRequest,
};
pub use modulation::{DeltaModulator, PcmModulator};
pub use palindrome::{find_longest_palindrome, Palindrome};
pub use scrambler::{
    b8zs_scramble, hdb3_scramble, scramble, ScrambledBitString, ScrambledSymbol, Scrambling,
};
pub use source::AnalogSource;
pub use types::{BitString, LineCode, Waveform};

/// Encode `bits` with the default sampling grid (100 samples per bit).
pub fn encode(bits: &BitString, line_code: LineCode) -> Result<Waveform> {
    LineEncoder::default().encode(bits, line_code)
}

/// Decode voltage samples taken `samples_per_bit` to a bit.
///
/// Uses [`DecoderMode::Memoryless`].
pub fn decode(voltage: &[f32], line_code: LineCode, samples_per_bit: usize) -> Result<BitString> {
    LineDecoder::new(SamplingConfig::new(samples_per_bit)?)?.decode(voltage, line_code)
}

/// PCM encode `samples` with `bit_depth` bits per sample.
pub fn pcm_encode(samples: &[f32], bit_depth: u8) -> Result<BitString> {
    PcmModulator::new(PcmConfig::new(bit_depth)?)?.encode(samples)
}

/// Delta modulate `samples` with the given step size.
pub fn delta_modulate(samples: &[f32], step: f32) -> Result<BitString> {
    DeltaModulator::new(DeltaConfig::new(step)?)?.encode(samples)
}
