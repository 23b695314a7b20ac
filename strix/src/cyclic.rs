// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::mem;

use log::{debug, trace};

use crate::{Alphabet, Error, Symbol, prefix_function};

/// Sorts the cyclic rotations of `text`.
///
/// Element `i` of the result is the starting position of the `i`-th smallest rotation of `text`.
/// Rotations that are equal as strings are ordered by their starting position, so the result is
/// fully deterministic.
///
/// This operation is *O*(*n* \* log(*n*) + *k*), where `k` is `alphabet.size()`.
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
/// let order = strix::cyclic_suffix_array(b"abab", Alphabet::fit(b"abab").unwrap()).unwrap();
///
/// assert_eq!(order, [0, 2, 1, 3]);
/// ```
pub fn cyclic_suffix_array<T: Symbol>(text: &[T], alphabet: Alphabet) -> Result<Vec<usize>, Error> {
    if text.is_empty() {
        return Err(Error::EmptyText);
    }

    let ranks = alphabet.ranks(text, 0)?;
    let n = ranks.len();

    debug!("building cyclic suffix array: n = {n}, alphabet = {alphabet}");

    let mut order = vec![0; n];
    let mut class = vec![0; n];
    let mut bucket = vec![0; n.max(alphabet.size())];

    // Sort the rotations by their first symbol
    for &c in &ranks {
        bucket[c] += 1;
    }
    for i in 1..alphabet.size() {
        bucket[i] += bucket[i - 1];
    }
    for (i, &c) in ranks.iter().enumerate().rev() {
        bucket[c] -= 1;
        order[bucket[c]] = i;
    }

    let mut num_classes = 1;
    for i in 1..n {
        if ranks[order[i]] != ranks[order[i - 1]] {
            num_classes += 1;
        }
        class[order[i]] = num_classes - 1;
    }

    // Double the compared length until every class is a distinct rotation or doubling stops
    // splitting classes
    let mut shifted = vec![0; n];
    let mut next_class = vec![0; n];
    let mut h = 1;
    while h < n && num_classes < n {
        // Sorting by the second half first and stably by the first half afterwards sorts by both.
        // `order` is already sorted by the class of the second half once shifted back by h.
        for (slot, &start) in shifted.iter_mut().zip(&order) {
            *slot = (start + n - h) % n;
        }

        bucket[..num_classes].fill(0);
        for &start in &shifted {
            bucket[class[start]] += 1;
        }
        for i in 1..num_classes {
            bucket[i] += bucket[i - 1];
        }
        for &start in shifted.iter().rev() {
            bucket[class[start]] -= 1;
            order[bucket[class[start]]] = start;
        }

        let previous_classes = num_classes;
        next_class[order[0]] = 0;
        num_classes = 1;
        for i in 1..n {
            let current = order[i];
            let previous = order[i - 1];
            if class[current] != class[previous]
                || class[(current + h) % n] != class[(previous + h) % n]
            {
                num_classes += 1;
            }
            next_class[current] = num_classes - 1;
        }
        mem::swap(&mut class, &mut next_class);

        trace!("cyclic doubling h = {h}: {num_classes} classes");

        if num_classes == previous_classes {
            break;
        }
        h *= 2;
    }

    // Equal rotations form contiguous runs of n / period entries each. Doubling leaves their
    // relative order arbitrary, so order every run by starting position.
    let border = prefix_function(&ranks)?[n - 1];
    let period = prefix_function::cyclic_period_from_border(n, border);
    let group_size = n / period;
    if group_size > 1 {
        for group in order.chunks_mut(group_size) {
            group.sort_unstable();
        }
    }

    Ok(order)
}
