// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{
    error,
    fmt::{self, Display, Formatter},
};

use crate::Alphabet;

/// An error indicating that the input to a builder or query violates its contract.
///
/// Every operation in this crate is a deterministic computation over caller-supplied data, so none
/// of these errors are transient: retrying with the same input fails the same way.
///
/// # Examples
///
/// ```
/// use strix::{Alphabet, Error};
///
/// let alphabet = Alphabet::from_chars('a', 'c');
/// let result = strix::suffix_array(&['a', 'b', 'x'], alphabet);
///
/// assert!(matches!(result, Err(Error::SymbolOutOfRange { position: 2, .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text is empty but the operation needs at least one symbol
    EmptyText,
    /// The lower alphabet bound is greater than the upper one, or the alphabet has more symbols
    /// than a `usize` can count
    InvalidAlphabet {
        /// The requested lower bound
        min: u32,
        /// The requested upper bound
        max: u32,
    },
    /// A symbol lies outside of the declared alphabet
    SymbolOutOfRange {
        /// The index of the offending symbol in its text or pattern
        position: usize,
        /// The value of the offending symbol
        symbol: u32,
        /// The alphabet the symbol was checked against
        alphabet: Alphabet,
    },
    /// The suffix array and the text have different lengths
    LengthMismatch {
        /// The length of the text
        text: usize,
        /// The length of the suffix array
        suffix_array: usize,
    },
    /// The suffix array is not a permutation of the text positions
    InvalidSuffixArray {
        /// The index into the suffix array
        index: usize,
        /// The entry found at `index`
        value: usize,
    },
    /// An Aho-Corasick pattern is empty
    EmptyPattern {
        /// The index of the pattern in insertion order
        index: usize,
    },
    /// An Aho-Corasick pattern was already added to the automaton
    DuplicatePattern {
        /// The index of the repeated pattern in insertion order
        index: usize,
        /// The index of the first pattern with the same contents
        first: usize,
    },
    /// An automaton state id that the automaton does not contain
    UnknownState {
        /// The requested state
        state: usize,
        /// The number of states in the automaton
        len: usize,
    },
    /// A substring range does not lie within the text
    RangeOutOfBounds {
        /// The start of the requested range
        start: usize,
        /// The end of the requested range
        end: usize,
        /// The length of the text
        len: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Error::EmptyText => write!(f, "text must not be empty"),
            Error::InvalidAlphabet { min, max } if min > max => {
                write!(f, "invalid alphabet: lower bound {min} exceeds upper bound {max}")
            }
            Error::InvalidAlphabet { min, max } => {
                write!(f, "invalid alphabet: [{min}, {max}] is too large for this target")
            }
            Error::SymbolOutOfRange {
                position,
                symbol,
                alphabet,
            } => write!(
                f,
                "symbol {symbol} at position {position} is outside of alphabet {alphabet}",
            ),
            Error::LengthMismatch { text, suffix_array } => write!(
                f,
                "length mismatch: text has {text} symbols, suffix array has {suffix_array} entries",
            ),
            Error::InvalidSuffixArray { index, value } => write!(
                f,
                "invalid suffix array: entry {value} at index {index} is out of range or repeated",
            ),
            Error::EmptyPattern { index } => write!(f, "pattern {index} is empty"),
            Error::DuplicatePattern { index, first } => {
                write!(f, "pattern {index} duplicates pattern {first}")
            }
            Error::UnknownState { state, len } => write!(
                f,
                "unknown automaton state {state}: automaton has {len} states",
            ),
            Error::RangeOutOfBounds { start, end, len } => {
                write!(f, "range {start}..{end} is out of bounds for length {len}")
            }
        }
    }
}

impl error::Error for Error {}
