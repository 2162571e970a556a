//! Longest palindromic substring via Manacher's algorithm.
//!
//! The input is interleaved with separators (`#a#b#a#`) so odd and even
//! length palindromes are both centred on a single position. Separators are a
//! distinct token rather than a reserved character, so any input symbol is
//! allowed.
//!
//! Runs in O(n): every successful extension step pushes the rightmost
//! palindrome boundary further right, and the boundary never moves back.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;
use tracing::trace;

use crate::types::BitString;

/// Longest palindrome found in a string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palindrome {
    /// The palindromic substring
    pub text: String,
    /// Offset of the first character, in characters
    pub start: usize,
    /// Length, in characters
    pub length: usize,
}

impl Palindrome {
    /// Character range covered in the searched string.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.start + self.length
    }
}

#[derive(PartialEq)]
enum Token<'a, T> {
    Separator,
    Item(&'a T),
}

/// Locate the longest palindromic run in `items`.
///
/// Returns the range of the first (lowest centre) maximal palindrome, or an
/// empty range at 0 for empty input.
#[must_use]
pub fn longest_palindromic_range<T: PartialEq>(items: &[T]) -> Range<usize> {
    if items.is_empty() {
        return 0..0;
    }

    let mut tokens = Vec::with_capacity(2 * items.len() + 1);
    tokens.push(Token::Separator);
    for item in items {
        tokens.push(Token::Item(item));
        tokens.push(Token::Separator);
    }

    let n = tokens.len();
    let mut radius = alloc::vec![0usize; n];
    let (mut center, mut right) = (0usize, 0usize);

    for i in 1..n - 1 {
        if i < right {
            let mirror = 2 * center - i;
            radius[i] = (right - i).min(radius[mirror]);
        }
        while radius[i] < i
            && i + radius[i] + 1 < n
            && tokens[i - radius[i] - 1] == tokens[i + radius[i] + 1]
        {
            radius[i] += 1;
        }
        if i + radius[i] > right {
            center = i;
            right = i + radius[i];
        }
    }

    // First maximum wins ties.
    let (best_center, best_radius) = radius
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0), |best, (i, r)| if r > best.1 { (i, r) } else { best });

    let start = (best_center - best_radius) / 2;
    trace!(center = best_center, radius = best_radius, "manacher sweep done");
    start..start + best_radius
}

/// Find the longest palindromic substring of `text`.
///
/// Empty input yields `("", 0, 0)`. When several palindromes share the
/// maximal length, the one with the lowest centre is reported.
#[must_use]
pub fn find_longest_palindrome(text: &str) -> Palindrome {
    let chars: Vec<char> = text.chars().collect();
    let range = longest_palindromic_range(&chars);
    Palindrome {
        text: chars[range.clone()].iter().collect(),
        start: range.start,
        length: range.len(),
    }
}

/// Find the longest palindromic run of a bit string.
#[must_use]
pub fn find_longest_palindrome_bits(bits: &BitString) -> Palindrome {
    let range = longest_palindromic_range(bits.as_slice());
    Palindrome {
        text: bits.as_slice()[range.clone()]
            .iter()
            .map(|&b| if b { '1' } else { '0' })
            .collect(),
        start: range.start,
        length: range.len(),
    }
}
