// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

/// Computes the Z-array of `text`.
///
/// Element `i` of the result is the length of the longest common prefix of `text` and
/// `text[i..]`. Element 0 is always 0 by convention. An empty text yields an empty array.
///
/// This operation is *O*(*n*).
///
/// # Examples
///
/// ```
/// let z = strix::z_array(b"aabxaab");
///
/// assert_eq!(z, [0, 1, 0, 0, 3, 1, 0]);
/// ```
#[must_use]
pub fn z_array<T: PartialEq>(text: &[T]) -> Vec<usize> {
    let n = text.len();
    let mut z = vec![0; n];

    // [l, r) is the rightmost window found so far that matches a prefix of `text`
    let mut l = 0;
    let mut r = 0;
    for i in 1..n {
        if i < r && z[i - l] < r - i {
            // The match at i lies strictly inside the window
            z[i] = z[i - l];
            continue;
        }

        // Extend by direct comparison, starting from whatever the window already guarantees
        let mut end = r.max(i);
        while end < n && text[end] == text[end - i] {
            end += 1;
        }
        z[i] = end - i;
        if end > r {
            l = i;
            r = end;
        }
    }

    z
}
