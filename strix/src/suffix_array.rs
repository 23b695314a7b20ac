// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{cmp::Ordering, ops::Range};

use log::debug;

use crate::{Alphabet, Error, Symbol, dc3, lcp};

/// Computes the suffix array of `text` over `alphabet`.
///
/// The result is the permutation of `0..text.len()` that lists the suffixes of `text` in
/// lexicographic order, where a proper prefix sorts before every longer string it begins.
///
/// This operation is *O*(*n* + *k*), where `k` is `alphabet.size()`.
///
/// # Errors
///
/// Returns [`Error::EmptyText`] if `text` is empty or [`Error::SymbolOutOfRange`] if `text`
/// contains a symbol outside of `alphabet`.
///
/// # Examples
///
/// ```
/// use strix::Alphabet;
///
/// let text: Vec<char> = "abacaba".chars().collect();
/// let suffix_array = strix::suffix_array(&text, Alphabet::from_chars('a', 'c')).unwrap();
///
/// assert_eq!(suffix_array, [6, 4, 0, 2, 5, 1, 3]);
/// ```
pub fn suffix_array<T: Symbol>(text: &[T], alphabet: Alphabet) -> Result<Vec<usize>, Error> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }

    debug!(
        "building suffix array: n = {}, alphabet = {alphabet}",
        text.len(),
    );

    // Shift by one so that 0 is free for the padding
    let ranks = alphabet.ranks(text, 1)?;

    Ok(dc3::dc3(&ranks, alphabet.size()))
}

/// A suffix array for a bounded-alphabet string.
pub struct SuffixArray<'a, T> {
    data: &'a [T],
    inner: Vec<usize>,
}

impl<'a, T: Symbol> SuffixArray<'a, T> {
    /// Creates a new `SuffixArray` for `data`.
    ///
    /// This operation is *O*(*n* + *k*), where `k` is `alphabet.size()`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is empty or contains a symbol outside of `alphabet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strix::{Alphabet, SuffixArray};
    ///
    /// let data = b"Hello, world!";
    /// let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();
    /// ```
    pub fn new(data: &'a [T], alphabet: Alphabet) -> Result<Self, Error> {
        let inner = suffix_array(data, alphabet)?;

        Ok(Self { data, inner })
    }

    /// Returns `true` if and only if `pattern` is contained in the associated data.
    ///
    /// This operation is *O*(*m* \* log(*n*)), where `m` is `pattern.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strix::{Alphabet, SuffixArray};
    ///
    /// let data = b"Hello, world!";
    /// let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();
    /// assert!(sa.contains(b"world"));
    /// ```
    #[must_use]
    pub fn contains(&self, pattern: &[T]) -> bool {
        self.inner
            .binary_search_by(|&suffix| self.compare_prefix(suffix, pattern))
            .is_ok()
    }

    /// Returns the starting positions of every occurrence of `pattern`, in ascending order.
    ///
    /// An empty pattern occurs at every position. This operation is
    /// *O*(*m* \* log(*n*) + *occ* \* log(*occ*)), where `occ` is the number of occurrences.
    ///
    /// # Examples
    ///
    /// ```
    /// use strix::{Alphabet, SuffixArray};
    ///
    /// let data = b"abracadabra";
    /// let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();
    /// assert_eq!(sa.find_all(b"abra"), [0, 7]);
    /// ```
    #[must_use]
    pub fn find_all(&self, pattern: &[T]) -> Vec<usize> {
        let mut positions = self.inner[self.matching_range(pattern)].to_vec();
        positions.sort_unstable();

        positions
    }

    /// Returns the range of sorted suffixes that begin with `pattern`.
    fn matching_range(&self, pattern: &[T]) -> Range<usize> {
        let start = self
            .inner
            .partition_point(|&suffix| self.compare_prefix(suffix, pattern) == Ordering::Less);
        let end = self
            .inner
            .partition_point(|&suffix| self.compare_prefix(suffix, pattern) != Ordering::Greater);

        start..end
    }

    /// Compares the first `pattern.len()` symbols of the suffix at `suffix` against `pattern`.
    fn compare_prefix(&self, suffix: usize, pattern: &[T]) -> Ordering {
        self.data[suffix..]
            .iter()
            .take(pattern.len())
            .map(|&c| c.value())
            .cmp(pattern.iter().map(|&c| c.value()))
    }
}

impl<'a, T: PartialEq> SuffixArray<'a, T> {
    /// Computes the LCP array of the associated data.
    ///
    /// See [`lcp_array()`](crate::lcp_array) for details. This operation is *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use strix::{Alphabet, SuffixArray};
    ///
    /// let data = b"banana";
    /// let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();
    /// assert_eq!(sa.lcp(), [1, 3, 0, 0, 2]);
    /// ```
    #[must_use]
    pub fn lcp(&self) -> Vec<usize> {
        lcp::kasai(self.data, &self.inner)
    }
}

impl<'a, T> SuffixArray<'a, T> {
    /// Returns the sorted suffix positions.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.inner
    }

    /// Returns the associated data.
    #[must_use]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Returns the number of suffixes, which is the length of the associated data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no suffixes. Construction rejects empty data, so this is
    /// always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Consumes the `SuffixArray`, returning the sorted suffix positions.
    #[must_use]
    pub fn into_inner(self) -> Vec<usize> {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_one_match() {
        let data = b"Hello, world!";
        let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();

        assert!(sa.contains(b"world"));
    }

    #[test]
    fn contains_two_matches() {
        let data = b"The quick brown fox jumped over the lazy dog because the fox was quick";
        let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();

        assert!(sa.contains(b"fox"));
        assert!(sa.contains(b"quick"));
    }

    #[test]
    fn contains_no_matches() {
        let data = b"Now is the time for all good men to come to the aid of the party";
        let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();

        assert!(!sa.contains(b"times"));
    }

    #[test]
    fn find_all_overlapping() {
        let data = b"aaaa";
        let sa = SuffixArray::new(data, Alphabet::fit(data).unwrap()).unwrap();

        assert_eq!(sa.find_all(b"aa"), [0, 1, 2]);
        assert_eq!(sa.find_all(b"aaaaa"), Vec::<usize>::new());
    }

    #[test]
    fn find_all_empty_pattern() {
        let data = b"abc";
        let sa = SuffixArray::new(data, Alphabet::bytes()).unwrap();

        assert_eq!(sa.find_all(b""), [0, 1, 2]);
    }

    #[test]
    fn pattern_outside_alphabet() {
        let data = b"abc";
        let sa = SuffixArray::new(data, Alphabet::fit(data).unwrap()).unwrap();

        assert!(!sa.contains(b"z"));
        assert!(sa.find_all(b"z").is_empty());
    }

    #[test]
    fn abacaba() {
        let text: Vec<char> = "abacaba".chars().collect();
        let sa = SuffixArray::new(&text, Alphabet::from_chars('a', 'c')).unwrap();

        assert_eq!(sa.as_slice(), [6, 4, 0, 2, 5, 1, 3]);
        assert_eq!(sa.lcp(), [1, 3, 1, 0, 2, 0]);
    }

    #[test]
    fn single_symbol() {
        let sa = SuffixArray::new(&[7u32], Alphabet::new(7, 7).unwrap()).unwrap();

        assert_eq!(sa.into_inner(), [0]);
    }

    #[test]
    fn wide_symbols() {
        let text: [u16; 5] = [1000, 10, 1000, 10, 5];
        let sa = suffix_array(&text, Alphabet::new(5, 1000).unwrap()).unwrap();

        assert_eq!(sa, [4, 3, 1, 2, 0]);
    }

    #[test]
    fn empty_text() {
        let result = SuffixArray::<u8>::new(&[], Alphabet::bytes());

        assert!(matches!(result, Err(Error::EmptyText)));
    }

    #[test]
    fn symbol_out_of_range() {
        let result = suffix_array(b"abd", Alphabet::from_chars('a', 'c'));

        assert_eq!(
            result,
            Err(Error::SymbolOutOfRange {
                position: 2,
                symbol: u32::from(b'd'),
                alphabet: Alphabet::from_chars('a', 'c'),
            }),
        );
    }
}
