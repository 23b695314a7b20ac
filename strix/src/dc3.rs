// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use log::trace;

/// The number of zero symbols appended to every level's text
///
/// Any window of three symbols starting at a real position stays in bounds.
const PADDING: usize = 3;

/// Computes the suffix array of `ranks` using the DC3 (skew) algorithm.
///
/// The algorithm is implemented as described in the [article] Simple Linear Work Suffix Array
/// Construction by Juha Kärkkäinen and Peter Sanders. It runs in *O*(*n*) time, recursing on a
/// problem two thirds the size of the current one whenever the length-3 substrings starting at
/// positions not divisible by 3 aren't pairwise distinct.
///
/// Every element of `ranks` must lie in `1..=alphabet_size`. The value 0 is reserved for the
/// virtual padding that terminates the text, so it compares smaller than every real symbol.
///
/// [article]: https://doi.org/10.1007/3-540-45061-0_73
pub(crate) fn dc3(ranks: &[usize], alphabet_size: usize) -> Vec<usize> {
    debug_assert!(
        ranks.iter().all(|&c| (1..=alphabet_size).contains(&c)),
        "ranks must lie in 1..=alphabet_size",
    );

    let n = ranks.len();
    if n < 2 {
        return (0..n).collect();
    }

    let mut text = Vec::with_capacity(n + PADDING);
    text.extend_from_slice(ranks);
    text.resize(n + PADDING, 0);

    let mut suffix_array = vec![0; n];
    sort_level(&text, &mut suffix_array, alphabet_size, 0);

    suffix_array
}

/// Sorts the suffixes of `text` into `suffix_array`.
///
/// `text` must be `suffix_array.len()` symbols followed by [`PADDING`] zeroes.
fn sort_level(text: &[usize], suffix_array: &mut [usize], alphabet_size: usize, depth: usize) {
    let n = suffix_array.len();
    debug_assert_eq!(text.len(), n + PADDING, "text must be padded");

    // Number of positions with residue 0, 1 and 2 modulo 3
    let n0 = (n + 2) / 3;
    let n1 = (n + 1) / 3;
    let n2 = n / 3;
    let n02 = n0 + n2;

    trace!("dc3 level {depth}: n = {n}, alphabet = {alphabet_size}, sample = {n02}");

    let mut s12 = vec![0; n02 + PADDING];
    let mut sa12 = vec![0; n02 + PADDING];
    let mut s0 = vec![0; n0];
    let mut sa0 = vec![0; n0];

    // Collect the sample positions. If n ≡ 1 (mod 3) a dummy position n is included so that the
    // last residue-0 suffix has a residue-1 successor to be ranked against.
    for (slot, position) in s12
        .iter_mut()
        .zip((0..n + (n0 - n1)).filter(|i| i % 3 != 0))
    {
        *slot = position;
    }

    // Stage 1: Sort the sample triples with three counting-sort passes, least significant first
    radix_pass(&text[2..], &s12[..n02], &mut sa12[..n02], alphabet_size);
    radix_pass(&text[1..], &sa12[..n02], &mut s12[..n02], alphabet_size);
    radix_pass(text, &s12[..n02], &mut sa12[..n02], alphabet_size);

    // Name the triples. Residue-1 names go to the first half of s12 and residue-2 names to the
    // second half, so that s12 becomes the reduced text.
    let mut name = 0;
    let mut previous: Option<&[usize]> = None;
    for &position in &sa12[..n02] {
        let triple = &text[position..position + 3];
        if previous != Some(triple) {
            name += 1;
            previous = Some(triple);
        }
        if position % 3 == 1 {
            s12[position / 3] = name;
        } else {
            s12[position / 3 + n0] = name;
        }
    }

    // Stage 2: Sort the sample suffixes
    if name < n02 {
        // Names aren't unique yet, so sort the reduced text recursively
        sort_level(&s12, &mut sa12[..n02], name, depth + 1);
        for (i, &position) in sa12[..n02].iter().enumerate() {
            s12[position] = i + 1;
        }
    } else {
        // The names are the ranks already
        for (i, &rank) in s12[..n02].iter().enumerate() {
            sa12[rank - 1] = i;
        }
    }

    // Stage 3: Sort the residue-0 suffixes by their first symbol and the rank of the sample suffix
    // that follows it. Stably iterating sa12 provides the second key for free.
    for (slot, &sample) in s0
        .iter_mut()
        .zip(sa12[..n02].iter().filter(|&&sample| sample < n0))
    {
        *slot = 3 * sample;
    }
    radix_pass(text, &s0, &mut sa0, alphabet_size);

    // Stage 4: Merge the residue-0 and sample suffixes
    let sample_position = |sample: usize| {
        if sample < n0 {
            sample * 3 + 1
        } else {
            (sample - n0) * 3 + 2
        }
    };

    // Skip the dummy, which always sorts first among the sample suffixes
    let mut t = n0 - n1;
    let mut p = 0;
    let mut k = 0;
    while k < n {
        let i = sample_position(sa12[t]);
        let j = sa0[p];

        let sample_first = if sa12[t] < n0 {
            // Residue 1 against residue 0: one symbol plus the rank of a sample suffix
            (text[i], s12[sa12[t] + n0]) <= (text[j], s12[j / 3])
        } else {
            // Residue 2 against residue 0: two symbols plus the rank of a sample suffix
            (text[i], text[i + 1], s12[sa12[t] - n0 + 1])
                <= (text[j], text[j + 1], s12[j / 3 + n0])
        };

        if sample_first {
            suffix_array[k] = i;
            k += 1;
            t += 1;
            if t == n02 {
                for &position in &sa0[p..] {
                    suffix_array[k] = position;
                    k += 1;
                }
            }
        } else {
            suffix_array[k] = j;
            k += 1;
            p += 1;
            if p == n0 {
                for &sample in &sa12[t..n02] {
                    suffix_array[k] = sample_position(sample);
                    k += 1;
                }
            }
        }
    }
}

/// Stably sorts `from` into `to` by the key `keys[from[i]]`.
fn radix_pass(keys: &[usize], from: &[usize], to: &mut [usize], alphabet_size: usize) {
    let mut bucket = vec![0; alphabet_size + 1];

    for &i in from {
        bucket[keys[i]] += 1;
    }

    // Turn counts into bucket starts
    let mut sum = 0;
    for x in bucket.iter_mut() {
        let count = *x;
        *x = sum;
        sum += count;
    }

    for &i in from {
        to[bucket[keys[i]]] = i;
        bucket[keys[i]] += 1;
    }
}
