// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::ops::Range;

use crate::{Error, Symbol};

/// Polynomial hashes of every substring of a text, modulo 2<sup>64</sup>.
///
/// The hash of `text[l..r]` is `text[l] * base^(r-l-1) + ... + text[r-1] * base^0`, computed with
/// wrapping arithmetic. Equal substrings always hash equal; unequal substrings collide only rarely
/// for a random odd `base`, though inputs crafted against a known base can force collisions.
///
/// # Examples
///
/// ```
/// use strix::PolynomialHash;
///
/// let hash = PolynomialHash::new(b"abcabc", 131);
///
/// assert_eq!(hash.substring_hash(0..3).unwrap(), hash.substring_hash(3..6).unwrap());
/// assert_ne!(hash.substring_hash(0..3).unwrap(), hash.substring_hash(1..4).unwrap());
/// ```
pub struct PolynomialHash {
    /// `prefixes[i]` is the hash of `text[..i]`
    prefixes: Vec<u64>,
    powers: Vec<u64>,
}

impl PolynomialHash {
    /// Precomputes the prefix hashes of `text` for `base`.
    ///
    /// This operation is *O*(*n*).
    #[must_use]
    pub fn new<T: Symbol>(text: &[T], base: u64) -> Self {
        let mut prefixes = Vec::with_capacity(text.len() + 1);
        let mut powers = Vec::with_capacity(text.len() + 1);
        prefixes.push(0);
        powers.push(1);

        let mut hash: u64 = 0;
        let mut power: u64 = 1;
        for &c in text {
            hash = hash.wrapping_mul(base).wrapping_add(u64::from(c.value()));
            power = power.wrapping_mul(base);
            prefixes.push(hash);
            powers.push(power);
        }

        Self { prefixes, powers }
    }

    /// Returns the length of the hashed text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len() - 1
    }

    /// Returns `true` if the hashed text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the hash of the substring at `range` in *O*(1).
    ///
    /// The empty substring hashes to 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] if `range` is inverted or extends past the end of the
    /// text.
    pub fn substring_hash(&self, range: Range<usize>) -> Result<u64, Error> {
        let Range { start, end } = range;
        if start > end || end > self.len() {
            return Err(Error::RangeOutOfBounds {
                start,
                end,
                len: self.len(),
            });
        }

        Ok(self.prefixes[end]
            .wrapping_sub(self.prefixes[start].wrapping_mul(self.powers[end - start])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_direct_evaluation() {
        let hash = PolynomialHash::new(b"xyz", 7);
        let expected = (u64::from(b'x') * 7 + u64::from(b'y')) * 7 + u64::from(b'z');

        assert_eq!(hash.substring_hash(0..3).unwrap(), expected);
        assert_eq!(hash.substring_hash(2..3).unwrap(), u64::from(b'z'));
    }

    #[test]
    fn equal_substrings_after_overflow() {
        let text = b"the quick brown fox; the quick brown fox";
        let hash = PolynomialHash::new(text, 0x9e37_79b9_7f4a_7c15);

        assert_eq!(hash.substring_hash(0..19).unwrap(), hash.substring_hash(21..40).unwrap());
    }

    #[test]
    fn empty_ranges() {
        let hash = PolynomialHash::new(b"abc", 31);

        assert_eq!(hash.substring_hash(2..2).unwrap(), 0);
        assert_eq!(hash.substring_hash(3..3).unwrap(), 0);
        assert_eq!(PolynomialHash::new::<u8>(&[], 31).len(), 0);
    }

    #[test]
    fn out_of_bounds() {
        let hash = PolynomialHash::new(b"abc", 31);

        assert_eq!(
            hash.substring_hash(1..4),
            Err(Error::RangeOutOfBounds {
                start: 1,
                end: 4,
                len: 3,
            }),
        );
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = hash.substring_hash(2..1);
        assert!(inverted.is_err());
    }
}
