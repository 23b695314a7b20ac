// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! Quadratic reference implementations used as test oracles.

#![allow(dead_code)]

/// Sorts the suffixes of `text` by direct comparison.
pub fn naive_suffix_array(text: &[u8]) -> Vec<usize> {
    let mut suffixes: Vec<usize> = (0..text.len()).collect();
    suffixes.sort_by(|&a, &b| text[a..].cmp(&text[b..]));

    suffixes
}

/// Compares every pair of neighboring suffixes directly.
pub fn naive_lcp(text: &[u8], suffix_array: &[usize]) -> Vec<usize> {
    suffix_array
        .windows(2)
        .map(|pair| common_prefix(&text[pair[0]..], &text[pair[1]..]))
        .collect()
}

/// Matches every position against the start of the text directly.
pub fn naive_z_array(text: &[u8]) -> Vec<usize> {
    (0..text.len())
        .map(|i| if i == 0 { 0 } else { common_prefix(text, &text[i..]) })
        .collect()
}

/// Tries every border length from longest to shortest.
pub fn naive_prefix_function(text: &[u8]) -> Vec<usize> {
    (0..text.len())
        .map(|i| {
            let prefix = &text[..=i];
            (0..=i)
                .rev()
                .find(|&len| prefix[..len] == prefix[i + 1 - len..])
                .unwrap_or(0)
        })
        .collect()
}

/// Rotates the text until it maps onto itself.
pub fn naive_cyclic_period(text: &[u8]) -> usize {
    (1..=text.len())
        .find(|&shift| rotation(text, shift) == text)
        .unwrap_or(text.len())
}

/// Finds the shortest prefix whose repetition covers the text.
pub fn naive_linear_period(text: &[u8]) -> usize {
    (1..=text.len())
        .find(|&period| (0..text.len()).all(|j| text[j] == text[j % period]))
        .unwrap_or(text.len())
}

/// Counts every (possibly overlapping) occurrence of every pattern.
pub fn naive_count(text: &[u8], patterns: &[Vec<u8>]) -> u64 {
    patterns
        .iter()
        .map(|pattern| {
            text.windows(pattern.len())
                .filter(|window| window == pattern)
                .count() as u64
        })
        .sum()
}

/// Returns `text` rotated left by `shift` symbols.
pub fn rotation(text: &[u8], shift: usize) -> Vec<u8> {
    let shift = shift % text.len();
    [&text[shift..], &text[..shift]].concat()
}

/// Returns every string of length `len` over the first `len` lowercase letters.
pub fn all_strings(len: usize) -> impl Iterator<Item = Vec<u8>> {
    let count = len.pow(len as u32);
    (0..count).map(move |mut mask| {
        (0..len)
            .map(|_| {
                let c = b'a' + (mask % len) as u8;
                mask /= len;
                c
            })
            .collect()
    })
}

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
