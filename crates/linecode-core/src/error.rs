//! Error types for codec operations.
//!
//! Every fallible operation in this crate is synchronous and pure, so an
//! error always means "nothing was produced". Errors fall into two classes,
//! see [`ErrorKind`].

use crate::types::LineCode;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, CodecError>;

/// Broad classification of a [`CodecError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The data handed to an operation is malformed.
    InvalidInput,
    /// The sampling or modulation configuration is unusable.
    Configuration,
}

/// Error raised by codec operations.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum CodecError {
    /// A bit string contained something other than `0` or `1`.
    #[error("invalid symbol {symbol:?} at index {index} (expected '0' or '1')")]
    InvalidSymbol {
        /// Character position of the offending symbol
        index: usize,
        /// The offending symbol
        symbol: char,
    },

    /// A line encoder was handed an empty bit string.
    #[error("bit string is empty")]
    EmptyBitString,

    /// Too few analog samples for the requested operation.
    #[error("signal needs at least {needed} samples, got {actual}")]
    InsufficientSamples {
        /// Minimum number of samples
        needed: usize,
        /// Number of samples supplied
        actual: usize,
    },

    /// An analog sample was NaN or infinite.
    #[error("sample {index} is not a finite number")]
    NonFiniteSample {
        /// Index of the offending sample
        index: usize,
    },

    /// A PCM bit stream does not split into whole codes.
    #[error("{length} bits do not split into {bit_depth}-bit codes")]
    CodeLengthMismatch {
        /// Length of the bit stream
        length: usize,
        /// Code width in bits
        bit_depth: u8,
    },

    /// A scheme key did not name any known scheme.
    #[error("unknown scheme name")]
    UnknownScheme,

    /// Samples per bit must be at least one, and the waveform it implies must
    /// fit in memory.
    #[error("samples per bit must be positive and the waveform must fit in memory")]
    InvalidSamplesPerBit,

    /// Split-phase codes need an even number of samples per bit.
    #[error("{line_code} needs an even number of samples per bit, got {samples_per_bit}")]
    OddSamplesPerBit {
        /// Configured samples per bit
        samples_per_bit: usize,
        /// Scheme that needs two equal halves
        line_code: LineCode,
    },

    /// Bit duration must be finite and positive.
    #[error("bit duration {0} must be finite and positive")]
    InvalidBitDuration(f32),

    /// PCM bit depth outside the supported range.
    #[error("bit depth {bit_depth} outside supported range {min}..={max}")]
    InvalidBitDepth {
        /// Requested depth
        bit_depth: u8,
        /// Smallest supported depth
        min: u8,
        /// Largest supported depth
        max: u8,
    },

    /// Delta modulation step must be finite and positive.
    #[error("step size {0} must be finite and positive")]
    InvalidStepSize(f32),
}

impl CodecError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSymbol { .. }
            | Self::EmptyBitString
            | Self::InsufficientSamples { .. }
            | Self::NonFiniteSample { .. }
            | Self::CodeLengthMismatch { .. }
            | Self::UnknownScheme => ErrorKind::InvalidInput,
            Self::InvalidSamplesPerBit
            | Self::OddSamplesPerBit { .. }
            | Self::InvalidBitDuration(_)
            | Self::InvalidBitDepth { .. }
            | Self::InvalidStepSize(_) => ErrorKind::Configuration,
        }
    }

    /// Whether this error reports malformed input data.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput)
    }

    /// Whether this error reports an unusable configuration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }

    /// Create an insufficient samples error.
    #[must_use]
    pub const fn insufficient_samples(needed: usize, actual: usize) -> Self {
        Self::InsufficientSamples { needed, actual }
    }
}

/// Check that every sample is finite.
pub(crate) fn ensure_finite(samples: &[f32]) -> Result<()> {
    match samples.iter().position(|s| !s.is_finite()) {
        Some(index) => Err(CodecError::NonFiniteSample { index }),
        None => Ok(()),
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ErrorKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::InvalidInput => defmt::write!(f, "InvalidInput"),
            Self::Configuration => defmt::write!(f, "Configuration"),
        }
    }
}
