// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use crate::Error;

/// Computes the prefix function (KMP failure function) of `text`.
///
/// Element `i` of the result is the length of the longest proper prefix of `text[..=i]` that is
/// also a suffix of it. Element 0 is always 0.
///
/// This operation is *O*(*n*).
///
/// # Errors
///
/// Returns [`Error::EmptyText`] if `text` is empty.
///
/// # Examples
///
/// ```
/// let p = strix::prefix_function(b"abacaba").unwrap();
///
/// assert_eq!(p, [0, 0, 1, 0, 1, 2, 3]);
/// ```
pub fn prefix_function<T: PartialEq>(text: &[T]) -> Result<Vec<usize>, Error> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }

    let mut p = vec![0; text.len()];

    // `k` grows by at most one per position and every fallback shrinks it, so the total work is
    // linear
    let mut k = 0;
    for i in 1..text.len() {
        while k > 0 && text[k] != text[i] {
            k = p[k - 1];
        }
        if text[k] == text[i] {
            k += 1;
        }
        p[i] = k;
    }

    Ok(p)
}

/// Returns the linear period of `text`.
///
/// The linear period is the length of the shortest string `P` such that `text` is a prefix of
/// `P` repeated enough times, e.g., 2 for `ababa` and 3 for `abba`.
///
/// This operation is *O*(*n*).
///
/// # Errors
///
/// Returns [`Error::EmptyText`] if `text` is empty.
///
/// # Examples
///
/// ```
/// assert_eq!(strix::linear_period(b"ababa").unwrap(), 2);
/// assert_eq!(strix::linear_period(b"abba").unwrap(), 3);
/// ```
pub fn linear_period<T: PartialEq>(text: &[T]) -> Result<usize, Error> {
    let p = prefix_function(text)?;

    Ok(period_from_border(text.len(), p[text.len() - 1]))
}

/// Returns the cyclic period of `text`.
///
/// The cyclic period is the smallest positive number of single-symbol left rotations that maps
/// `text` onto itself, e.g., 1 for `aaaaa`, 2 for `ababab`, and 4 for `abba`. It always divides
/// `text.len()`.
///
/// This operation is *O*(*n*).
///
/// # Errors
///
/// Returns [`Error::EmptyText`] if `text` is empty.
///
/// # Examples
///
/// ```
/// assert_eq!(strix::cyclic_period(b"ababab").unwrap(), 2);
/// assert_eq!(strix::cyclic_period(b"ababa").unwrap(), 5);
/// ```
pub fn cyclic_period<T: PartialEq>(text: &[T]) -> Result<usize, Error> {
    let p = prefix_function(text)?;

    Ok(cyclic_period_from_border(text.len(), p[text.len() - 1]))
}

fn period_from_border(len: usize, border: usize) -> usize {
    len - border
}

/// A linear period is a cyclic one only if whole copies of it tile the text. It must also repeat
/// at least twice, otherwise the period is the text itself.
pub(crate) fn cyclic_period_from_border(len: usize, border: usize) -> usize {
    let period = period_from_border(len, border);
    if 2 * period <= len && len % period == 0 {
        period
    } else {
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borders() {
        assert_eq!(prefix_function(b"aabaaab").unwrap(), [0, 1, 0, 1, 2, 2, 3]);
        assert_eq!(prefix_function(b"abcd").unwrap(), [0, 0, 0, 0]);
        assert_eq!(prefix_function(b"aaaa").unwrap(), [0, 1, 2, 3]);
    }

    #[test]
    fn single_symbol() {
        assert_eq!(prefix_function(b"z").unwrap(), [0]);
        assert_eq!(linear_period(b"z").unwrap(), 1);
        assert_eq!(cyclic_period(b"z").unwrap(), 1);
    }

    #[test]
    fn linear_periods() {
        assert_eq!(linear_period(b"aaaaa").unwrap(), 1);
        assert_eq!(linear_period(b"ababa").unwrap(), 2);
        assert_eq!(linear_period(b"abba").unwrap(), 3);
        assert_eq!(linear_period(b"abcd").unwrap(), 4);
    }

    #[test]
    fn cyclic_periods() {
        assert_eq!(cyclic_period(b"aaaaa").unwrap(), 1);
        assert_eq!(cyclic_period(b"ababab").unwrap(), 2);
        assert_eq!(cyclic_period(b"abba").unwrap(), 4);
        assert_eq!(cyclic_period(b"abcabcab").unwrap(), 8);
    }

    #[test]
    fn empty_text() {
        assert_eq!(prefix_function::<u8>(&[]), Err(Error::EmptyText));
        assert_eq!(linear_period::<u8>(&[]), Err(Error::EmptyText));
        assert_eq!(cyclic_period::<u8>(&[]), Err(Error::EmptyText));
    }
}
