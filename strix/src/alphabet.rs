// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::fmt::{self, Display, Formatter};

use crate::Error;

// Symbols are ranked by casting u32 differences to usize. Targets narrower than 32 bits would
// truncate those ranks, so refuse to build for them.
#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("Target pointer width must be at least 32 bits");

/// Trait for types that can be used as symbols of an alphabet-bounded text.
///
/// This trait is automatically implemented for any type that converts losslessly into a `u32`
/// (`u8`, `u16`, `u32`, `char`, etc.).
pub trait Symbol: Copy + Into<u32> {
    /// Returns the numeric value of the symbol.
    fn value(self) -> u32 {
        self.into()
    }
}

impl<T: Copy + Into<u32>> Symbol for T {}

/// An inclusive range of symbol values `[min, max]`.
///
/// Algorithms that bucket symbols by value allocate tables proportional to [`Alphabet::size()`],
/// so the bound should be as tight as practical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    min: u32,
    max: u32,
}

impl Alphabet {
    /// Creates an alphabet containing every symbol in `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlphabet`] if `min > max` or if the alphabet has more symbols than
    /// fit in a `usize` (only possible on 32-bit targets).
    ///
    /// # Examples
    ///
    /// ```
    /// use strix::Alphabet;
    ///
    /// let alphabet = Alphabet::new(1, 4).unwrap();
    /// assert_eq!(alphabet.size(), 4);
    /// assert!(Alphabet::new(4, 1).is_err());
    /// ```
    pub fn new(min: u32, max: u32) -> Result<Self, Error> {
        if min > max || span(min, max).is_none() {
            return Err(Error::InvalidAlphabet { min, max });
        }

        Ok(Self { min, max })
    }

    /// Creates the alphabet of all byte values.
    #[must_use]
    pub const fn bytes() -> Self {
        Self {
            min: 0,
            max: u8::MAX as u32,
        }
    }

    /// Creates the alphabet of all characters in `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn from_chars(min: char, max: char) -> Self {
        assert!(min <= max, "lower bound must not exceed upper bound");

        Self {
            min: min.value(),
            max: max.value(),
        }
    }

    /// Creates the tightest alphabet containing every symbol of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyText`] if `text` is empty, or [`Error::InvalidAlphabet`] if the fitted
    /// alphabet is too large for the target (see [`Alphabet::new()`]).
    pub fn fit<T: Symbol>(text: &[T]) -> Result<Self, Error> {
        let mut symbols = text.iter().map(|&c| c.value());
        let first = symbols.next().ok_or(Error::EmptyText)?;
        let (min, max) = symbols.fold((first, first), |(min, max), c| (min.min(c), max.max(c)));

        Self::new(min, max)
    }

    /// Returns the smallest symbol of the alphabet.
    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Returns the largest symbol of the alphabet.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Returns the number of symbols in the alphabet.
    #[must_use]
    pub fn size(&self) -> usize {
        // Every constructor rejects alphabets whose size overflows
        span(self.min, self.max).unwrap_or(usize::MAX)
    }

    /// Returns `true` if and only if `symbol` lies within the alphabet.
    #[must_use]
    pub fn contains(&self, symbol: u32) -> bool {
        (self.min..=self.max).contains(&symbol)
    }

    /// Returns the zero-based rank of `symbol` within the alphabet, or `None` if the alphabet
    /// doesn't contain it.
    #[must_use]
    pub fn rank(&self, symbol: u32) -> Option<usize> {
        self.contains(symbol).then(|| (symbol - self.min) as usize)
    }

    /// Maps every symbol of `text` to its rank plus `shift`, validating it along the way.
    pub(crate) fn ranks<T: Symbol>(&self, text: &[T], shift: usize) -> Result<Vec<usize>, Error> {
        text.iter()
            .enumerate()
            .map(|(position, &c)| {
                let symbol = c.value();
                self.rank(symbol)
                    .map(|rank| rank + shift)
                    .ok_or(Error::SymbolOutOfRange {
                        position,
                        symbol,
                        alphabet: *self,
                    })
            })
            .collect()
    }
}

/// Returns the number of symbols in `min..=max`, or `None` if it doesn't fit in a `usize`.
fn span(min: u32, max: u32) -> Option<usize> {
    usize::try_from(max - min).ok()?.checked_add(1)
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
