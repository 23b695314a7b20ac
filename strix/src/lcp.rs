// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use log::debug;

use crate::Error;

/// Marks an inverse-permutation slot that no suffix array entry has claimed yet
const UNCLAIMED: usize = usize::MAX;

/// Computes the LCP array of `text` given its suffix array.
///
/// Element `i` of the result is the length of the longest common prefix of the suffixes starting at
/// `suffix_array[i]` and `suffix_array[i + 1]`, so the result has `text.len() - 1` elements.
///
/// The array is computed with Kasai's algorithm in *O*(*n*) time.
///
/// # Errors
///
/// Returns [`Error::EmptyText`] if `text` is empty, [`Error::LengthMismatch`] if the lengths of
/// `text` and `suffix_array` differ, or [`Error::InvalidSuffixArray`] if `suffix_array` is not a
/// permutation of `0..text.len()`.
///
/// # Examples
///
/// ```
/// let lcp = strix::lcp_array(b"banana", &[5, 3, 1, 0, 4, 2]).unwrap();
///
/// assert_eq!(lcp, [1, 3, 0, 0, 2]);
/// ```
pub fn lcp_array<T: PartialEq>(text: &[T], suffix_array: &[usize]) -> Result<Vec<usize>, Error> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }
    if text.len() != suffix_array.len() {
        return Err(Error::LengthMismatch {
            text: text.len(),
            suffix_array: suffix_array.len(),
        });
    }

    let rank = inverse(suffix_array)?;

    Ok(kasai_with_rank(text, suffix_array, &rank))
}

/// Computes the LCP array of a text whose suffix array is known to be valid.
pub(crate) fn kasai<T: PartialEq>(text: &[T], suffix_array: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; suffix_array.len()];
    for (i, &suffix) in suffix_array.iter().enumerate() {
        rank[suffix] = i;
    }

    kasai_with_rank(text, suffix_array, &rank)
}

fn kasai_with_rank<T: PartialEq>(text: &[T], suffix_array: &[usize], rank: &[usize]) -> Vec<usize> {
    let n = text.len();
    debug!("building lcp array: n = {n}");

    let mut lcp = vec![0; n.saturating_sub(1)];

    // Visit suffixes in text order. Dropping the first symbol of a suffix shortens its match with
    // the next suffix in sorted order by at most one, so `k` only ever shrinks by one per step.
    let mut k: usize = 0;
    for i in 0..n {
        if rank[i] == n - 1 {
            // The last suffix in sorted order has no successor to match
            k = 0;
            continue;
        }

        let j = suffix_array[rank[i] + 1];
        while i + k < n && j + k < n && text[i + k] == text[j + k] {
            k += 1;
        }
        lcp[rank[i]] = k;

        k = k.saturating_sub(1);
    }

    lcp
}

/// Inverts `suffix_array`, verifying that it is a permutation along the way.
fn inverse(suffix_array: &[usize]) -> Result<Vec<usize>, Error> {
    let n = suffix_array.len();
    let mut rank = vec![UNCLAIMED; n];

    for (index, &value) in suffix_array.iter().enumerate() {
        match rank.get_mut(value) {
            Some(slot) if *slot == UNCLAIMED => *slot = index,
            _ => return Err(Error::InvalidSuffixArray { index, value }),
        }
    }

    Ok(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abacaba() {
        let lcp = lcp_array(b"abacaba", &[6, 4, 0, 2, 5, 1, 3]).unwrap();

        assert_eq!(lcp, [1, 3, 1, 0, 2, 0]);
    }

    #[test]
    fn unary() {
        let lcp = lcp_array(b"aaaaa", &[4, 3, 2, 1, 0]).unwrap();

        assert_eq!(lcp, [1, 2, 3, 4]);
    }

    #[test]
    fn single_symbol() {
        let lcp = lcp_array(b"x", &[0]).unwrap();

        assert!(lcp.is_empty());
    }

    #[test]
    fn empty_text() {
        assert_eq!(lcp_array::<u8>(&[], &[]), Err(Error::EmptyText));
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            lcp_array(b"abc", &[0, 1]),
            Err(Error::LengthMismatch {
                text: 3,
                suffix_array: 2,
            }),
        );
    }

    #[test]
    fn out_of_range_entry() {
        assert_eq!(
            lcp_array(b"abc", &[0, 3, 1]),
            Err(Error::InvalidSuffixArray { index: 1, value: 3 }),
        );
    }

    #[test]
    fn repeated_entry() {
        assert_eq!(
            lcp_array(b"abc", &[0, 1, 0]),
            Err(Error::InvalidSuffixArray { index: 2, value: 0 }),
        );
    }
}
