// Copyright 2023 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

//! String indexing and multi-pattern matching over bounded integer alphabets.
//!
//! This crate provides linear-time suffix array construction (DC3), LCP arrays, Z-arrays, prefix
//! functions with period detection, cyclic rotation sorting, and Aho-Corasick automata for
//! counting pattern occurrences in a stream.
//!
//! Texts are slices of any [`Symbol`] type (`u8`, `u16`, `u32`, `char`). Algorithms that bucket
//! symbols by value take an explicit [`Alphabet`] and reject symbols outside of it.
//!
//! # Examples
//!
//! Sorting the suffixes of a text and finding common prefixes between neighbors:
//!
//! ```
//! use strix::{Alphabet, SuffixArray};
//!
//! # fn main() -> Result<(), strix::Error> {
//! let text = b"abacaba";
//! let sa = SuffixArray::new(text, Alphabet::fit(text)?)?;
//!
//! assert_eq!(sa.as_slice(), [6, 4, 0, 2, 5, 1, 3]);
//! assert_eq!(sa.lcp(), [1, 3, 1, 0, 2, 0]);
//! # Ok(())
//! # }
//! ```
//!
//! Counting overlapping occurrences of several patterns:
//!
//! ```
//! use strix::Alphabet;
//!
//! # fn main() -> Result<(), strix::Error> {
//! let patterns: [&[u8]; 2] = [b"a", b"ab"];
//! let automaton = strix::aho_corasick(&patterns, Alphabet::from_chars('a', 'z'))?;
//!
//! assert_eq!(strix::count_matches(b"aab", &automaton)?, 3);
//! # Ok(())
//! # }
//! ```

mod aho_corasick;
mod alphabet;
mod cyclic;
mod dc3;
mod error;
mod hash;
mod lcp;
mod prefix_function;
mod suffix_array;
mod z_function;

pub use aho_corasick::{Automaton, AutomatonBuilder, ROOT, Scanner, aho_corasick, count_matches};
pub use alphabet::{Alphabet, Symbol};
pub use cyclic::cyclic_suffix_array;
pub use error::Error;
pub use hash::PolynomialHash;
pub use lcp::lcp_array;
pub use prefix_function::{cyclic_period, linear_period, prefix_function};
pub use suffix_array::{SuffixArray, suffix_array};
pub use z_function::z_array;
