//! Core types: bit strings, sampled waveforms and line code selection.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::{CodecError, Result};

/// Number of symbols shown by [`BitString::preview`] before eliding.
pub const PREVIEW_SYMBOLS: usize = 50;

/// Ordered sequence of binary symbols.
///
/// Parsed from text made only of `0` and `1`; anything else is rejected with
/// the index of the first offending character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Wrap an already validated bit vector.
    #[must_use]
    pub const fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parse a string of `0`/`1` symbols.
    pub fn parse(text: &str) -> Result<Self> {
        text.parse()
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the string has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Borrow the symbols.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Iterate over the symbols.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Symbol at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Error unless at least one symbol is present.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.bits.is_empty() {
            Err(CodecError::EmptyBitString)
        } else {
            Ok(())
        }
    }

    /// First [`PREVIEW_SYMBOLS`] symbols, followed by `...` when truncated.
    #[must_use]
    pub fn preview(&self) -> heapless::String<{ PREVIEW_SYMBOLS + 3 }> {
        let mut s = heapless::String::new();
        for bit in self.bits.iter().take(PREVIEW_SYMBOLS) {
            let _ = s.push(if *bit { '1' } else { '0' });
        }
        if self.bits.len() > PREVIEW_SYMBOLS {
            let _ = s.push_str("...");
        }
        s
    }

    /// Unwrap into the underlying vector.
    #[must_use]
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

impl FromStr for BitString {
    type Err = CodecError;

    fn from_str(text: &str) -> Result<Self> {
        text.chars()
            .enumerate()
            .map(|(index, symbol)| match symbol {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(CodecError::InvalidSymbol { index, symbol }),
            })
            .collect::<Result<Vec<bool>>>()
            .map(Self::from_bits)
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bits(iter.into_iter().collect())
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self::from_bits(bits)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Sampled voltage waveform produced by the line encoder.
///
/// `time` is strictly increasing and has the same length as `voltage`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Waveform {
    time: Vec<f64>,
    voltage: Vec<f32>,
    samples_per_bit: usize,
}

impl Waveform {
    /// Empty waveform with room for `bits` intervals.
    ///
    /// Fails with [`CodecError::InvalidSamplesPerBit`] when the sample count
    /// overflows or cannot be allocated.
    pub(crate) fn try_with_capacity(bits: usize, samples_per_bit: usize) -> Result<Self> {
        let samples = bits
            .checked_mul(samples_per_bit)
            .ok_or(CodecError::InvalidSamplesPerBit)?;
        let mut time = Vec::new();
        let mut voltage = Vec::new();
        time.try_reserve_exact(samples).map_err(|_| CodecError::InvalidSamplesPerBit)?;
        voltage.try_reserve_exact(samples).map_err(|_| CodecError::InvalidSamplesPerBit)?;
        Ok(Self {
            time,
            voltage,
            samples_per_bit,
        })
    }

    /// Append a constant-level segment sampled at `times`.
    pub(crate) fn push_segment(&mut self, times: impl Iterator<Item = f64>, level: f32) {
        for t in times {
            self.time.push(t);
            self.voltage.push(level);
        }
    }

    /// Sample times.
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Voltage samples.
    #[must_use]
    pub fn voltage(&self) -> &[f32] {
        &self.voltage
    }

    /// Samples per bit this waveform was generated with.
    #[must_use]
    pub const fn samples_per_bit(&self) -> usize {
        self.samples_per_bit
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    /// Whether the waveform holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }

    /// Number of whole bit intervals.
    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.voltage.len().checked_div(self.samples_per_bit).unwrap_or(0)
    }

    /// Voltage samples of bit interval `index`.
    #[must_use]
    pub fn bit_window(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.samples_per_bit)?;
        let end = start.checked_add(self.samples_per_bit)?;
        self.voltage.get(start..end)
    }

    /// Iterate over `(time, voltage)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f32)> + '_ {
        self.time.iter().copied().zip(self.voltage.iter().copied())
    }

    /// Split into `(time, voltage)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f32>) {
        (self.time, self.voltage)
    }
}

/// Line coding scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineCode {
    /// Non-Return-to-Zero Level
    NrzL,
    /// Non-Return-to-Zero Inverted
    NrzI,
    /// Manchester (IEEE 802.3 polarity: 1 = low→high)
    Manchester,
    /// Differential Manchester
    DifferentialManchester,
    /// Alternate Mark Inversion
    Ami,
}

impl LineCode {
    /// All schemes, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::NrzL,
        Self::NrzI,
        Self::Manchester,
        Self::DifferentialManchester,
        Self::Ami,
    ];

    /// Whether each bit is split into two half-interval segments.
    #[must_use]
    pub const fn is_split_phase(self) -> bool {
        matches!(self, Self::Manchester | Self::DifferentialManchester)
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NrzL => "NRZ-L",
            Self::NrzI => "NRZ-I",
            Self::Manchester => "Manchester",
            Self::DifferentialManchester => "Differential Manchester",
            Self::Ami => "AMI",
        }
    }

    /// Stable lowercase key, as used by string based front-ends.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NrzL => "nrz_l",
            Self::NrzI => "nrz_i",
            Self::Manchester => "manchester",
            Self::DifferentialManchester => "diff_manchester",
            Self::Ami => "ami",
        }
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_key(s)?.as_str() {
            "nrzl" => Ok(Self::NrzL),
            "nrzi" => Ok(Self::NrzI),
            "manchester" => Ok(Self::Manchester),
            "diffmanchester" | "differentialmanchester" => Ok(Self::DifferentialManchester),
            "ami" => Ok(Self::Ami),
            _ => Err(CodecError::UnknownScheme),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LineCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}

/// Lowercase a scheme key and drop `-`, `_` and spaces.
pub(crate) fn normalize_key(s: &str) -> Result<heapless::String<32>> {
    let mut key = heapless::String::new();
    for ch in s.trim().chars().filter(|c| !matches!(c, '-' | '_' | ' ')) {
        key.push(ch.to_ascii_lowercase())
            .map_err(|()| CodecError::UnknownScheme)?;
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_parse_bits() {
        let bits: BitString = "1100".parse().unwrap();
        assert_eq!(bits.as_slice(), &[true, true, false, false]);
        assert_eq!(bits.to_string(), "1100");
    }

    #[test]
    fn test_parse_rejects_other_symbols() {
        assert_eq!(
            BitString::parse("10a1"),
            Err(CodecError::InvalidSymbol {
                index: 2,
                symbol: 'a'
            })
        );
        assert!(BitString::parse("1 0").is_err());
    }

    #[test]
    fn test_empty_parse_is_ok_but_not_encodable() {
        let bits = BitString::parse("").unwrap();
        assert!(bits.is_empty());
        assert_eq!(bits.ensure_non_empty(), Err(CodecError::EmptyBitString));
    }

    #[test]
    fn test_preview_elides_long_strings() {
        let short = BitString::from_bits(vec![true; 10]);
        assert_eq!(short.preview().as_str(), "1111111111");

        let long = BitString::from_bits(vec![false; 60]);
        let preview = long.preview();
        assert_eq!(preview.len(), PREVIEW_SYMBOLS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_line_code_keys() {
        for code in LineCode::ALL {
            assert_eq!(code.key().parse::<LineCode>(), Ok(code));
            assert_eq!(code.name().parse::<LineCode>(), Ok(code));
        }
        assert_eq!("NRZ-L".parse::<LineCode>(), Ok(LineCode::NrzL));
        assert_eq!(
            "differential_manchester".parse::<LineCode>(),
            Ok(LineCode::DifferentialManchester)
        );
        assert_eq!("4b5b".parse::<LineCode>(), Err(CodecError::UnknownScheme));
    }

    #[test]
    fn test_split_phase() {
        assert!(LineCode::Manchester.is_split_phase());
        assert!(LineCode::DifferentialManchester.is_split_phase());
        assert!(!LineCode::Ami.is_split_phase());
    }

    #[test]
    fn test_waveform_windows() {
        let mut wf = Waveform::try_with_capacity(2, 2).unwrap();
        wf.push_segment([0.0, 0.5].into_iter(), 1.0);
        wf.push_segment([1.0, 1.5].into_iter(), -1.0);
        assert_eq!(wf.bit_count(), 2);
        assert_eq!(wf.bit_window(1), Some(&[-1.0, -1.0][..]));
        assert_eq!(wf.bit_window(2), None);
        assert_eq!(wf.points().nth(1), Some((0.5, 1.0)));
    }

    #[test]
    fn test_capacity_overflow_is_an_error() {
        assert_eq!(
            Waveform::try_with_capacity(2, usize::MAX),
            Err(CodecError::InvalidSamplesPerBit)
        );
        assert_eq!(
            Waveform::try_with_capacity(1, usize::MAX),
            Err(CodecError::InvalidSamplesPerBit)
        );
    }
}
