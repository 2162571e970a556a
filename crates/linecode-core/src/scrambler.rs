//! Zero-run substitution scrambling (B8ZS, HDB3).
//!
//! Long runs of zeros starve a receiver's clock recovery. Both schemes cut
//! qualifying runs into fixed-size blocks and replace each block with a
//! pattern containing bipolar violations (`V`) and balancing pulses (`B`).
//! The result is a display artifact: it cannot be line encoded and cannot be
//! descrambled without knowing where substitutions happened.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use tracing::{debug, trace};

use crate::error::{CodecError, Result};
use crate::types::{normalize_key, BitString};

/// Symbol of a scrambled bit string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrambledSymbol {
    /// Space
    Zero,
    /// Mark
    One,
    /// Balancing pulse (`B`)
    Balancing,
    /// Bipolar violation (`V`)
    Violation,
}

impl ScrambledSymbol {
    /// Display character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::Balancing => 'B',
            Self::Violation => 'V',
        }
    }
}

impl From<bool> for ScrambledSymbol {
    fn from(bit: bool) -> Self {
        if bit {
            Self::One
        } else {
            Self::Zero
        }
    }
}

use ScrambledSymbol::{Balancing as B, Violation as V, Zero as O};

/// B8ZS replacement for eight zeros: `000VB0VB`.
pub const B8ZS_PATTERN: [ScrambledSymbol; 8] = [O, O, O, V, B, O, V, B];

/// HDB3 replacement when an even number of substitutions precede it: `000V`.
pub const HDB3_EVEN_PATTERN: [ScrambledSymbol; 4] = [O, O, O, V];

/// HDB3 replacement when an odd number of substitutions precede it: `B00V`.
pub const HDB3_ODD_PATTERN: [ScrambledSymbol; 4] = [B, O, O, V];

/// Sequence over `{0, 1, B, V}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrambledBitString {
    symbols: Vec<ScrambledSymbol>,
}

impl ScrambledBitString {
    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether there are no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Borrow the symbols.
    #[must_use]
    pub fn symbols(&self) -> &[ScrambledSymbol] {
        &self.symbols
    }

    /// Number of bipolar violations inserted.
    #[must_use]
    pub fn violations(&self) -> usize {
        self.symbols
            .iter()
            .filter(|s| **s == ScrambledSymbol::Violation)
            .count()
    }
}

impl fmt::Display for ScrambledBitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for symbol in &self.symbols {
            f.write_char(symbol.as_char())?;
        }
        Ok(())
    }
}

/// Maximal run of zeros inside a bit string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroRun {
    /// Index of the first zero
    pub start: usize,
    /// Number of zeros
    pub length: usize,
}

impl ZeroRun {
    /// Index one past the last zero.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Find every maximal run of zeros, in order.
#[must_use]
pub fn find_zero_runs(bits: &BitString) -> Vec<ZeroRun> {
    let mut runs = Vec::new();
    let mut current: Option<ZeroRun> = None;
    for (index, bit) in bits.iter().enumerate() {
        if bit {
            runs.extend(current.take());
        } else if let Some(run) = current.as_mut() {
            run.length += 1;
        } else {
            current = Some(ZeroRun { start: index, length: 1 });
        }
    }
    runs.extend(current);
    runs
}

/// Zero-run substitution scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scrambling {
    /// Bipolar with 8-Zero Substitution
    B8zs,
    /// High-Density Bipolar of order 3
    Hdb3,
}

impl Scrambling {
    /// Both schemes.
    pub const ALL: [Self; 2] = [Self::B8zs, Self::Hdb3];

    /// Block size substituted at a time; shorter runs are left alone.
    #[must_use]
    pub const fn block_len(self) -> usize {
        match self {
            Self::B8zs => B8ZS_PATTERN.len(),
            Self::Hdb3 => HDB3_EVEN_PATTERN.len(),
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::B8zs => "B8ZS",
            Self::Hdb3 => "HDB3",
        }
    }

    /// Replacement pattern for the substitution with the given ordinal
    /// (counted across the whole call).
    #[must_use]
    pub const fn pattern(self, ordinal: usize) -> &'static [ScrambledSymbol] {
        match self {
            Self::B8zs => &B8ZS_PATTERN,
            Self::Hdb3 if ordinal % 2 == 0 => &HDB3_EVEN_PATTERN,
            Self::Hdb3 => &HDB3_ODD_PATTERN,
        }
    }
}

impl fmt::Display for Scrambling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scrambling {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_key(s)?.as_str() {
            "b8zs" => Ok(Self::B8zs),
            "hdb3" => Ok(Self::Hdb3),
            _ => Err(CodecError::UnknownScheme),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Scrambling {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}

/// Scramble `bits` with the given scheme.
///
/// The output is a fresh buffer of the same length; only whole blocks inside
/// qualifying zero runs are replaced, everything else is copied.
#[must_use]
pub fn scramble(bits: &BitString, scheme: Scrambling) -> ScrambledBitString {
    let mut symbols: Vec<ScrambledSymbol> = bits.iter().map(ScrambledSymbol::from).collect();
    let block = scheme.block_len();
    let mut substitutions = 0usize;

    for run in find_zero_runs(bits) {
        if run.length < block {
            continue;
        }
        for offset in (0..=run.length - block).step_by(block) {
            let start = run.start + offset;
            symbols[start..start + block].copy_from_slice(scheme.pattern(substitutions));
            substitutions += 1;
        }
        trace!(start = run.start, length = run.length, "zero run substituted");
    }

    debug!(%scheme, bits = bits.len(), substitutions, "scrambled");
    ScrambledBitString { symbols }
}

/// B8ZS scrambling.
#[must_use]
pub fn b8zs_scramble(bits: &BitString) -> ScrambledBitString {
    scramble(bits, Scrambling::B8zs)
}

/// HDB3 scrambling.
#[must_use]
pub fn hdb3_scramble(bits: &BitString) -> ScrambledBitString {
    scramble(bits, Scrambling::Hdb3)
}
