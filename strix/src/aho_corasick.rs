// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::cell::Cell;

use log::debug;

use crate::{Alphabet, Error, Symbol};

/// The id of the root state
pub const ROOT: usize = 0;

/// The representation of a missing trie edge
const NO_NODE: usize = usize::MAX;

/// The representation of a memoized value that hasn't been computed yet
const UNKNOWN: usize = usize::MAX;

struct Node {
    /// Trie edges, indexed by symbol rank
    children: Box<[usize]>,
    /// The index of the pattern that ends at this node, if any
    pattern: Option<usize>,
    parent: usize,
    /// The rank of the symbol on the edge from `parent`
    symbol: usize,
    suffix_link: Cell<usize>,
    /// Memoized transitions, indexed by symbol rank
    next_state: Box<[Cell<usize>]>,
}

impl Node {
    fn new(alphabet_size: usize, parent: usize, symbol: usize) -> Self {
        Self {
            children: vec![NO_NODE; alphabet_size].into_boxed_slice(),
            pattern: None,
            parent,
            symbol,
            suffix_link: Cell::new(UNKNOWN),
            next_state: (0..alphabet_size).map(|_| Cell::new(UNKNOWN)).collect(),
        }
    }
}

/// Builds an Aho-Corasick automaton for `patterns` over `alphabet`.
///
/// The automaton is pre-sized to hold one state per pattern symbol plus the root.
///
/// # Errors
///
/// Returns an error if a pattern is empty, repeats an earlier pattern, or contains a symbol outside
/// of `alphabet`. See [`AutomatonBuilder::add_pattern()`].
///
/// # Examples
///
/// ```
/// use strix::Alphabet;
///
/// let patterns: [&[u8]; 2] = [b"a", b"ab"];
/// let automaton = strix::aho_corasick(&patterns, Alphabet::fit(b"ab").unwrap()).unwrap();
///
/// assert_eq!(strix::count_matches(b"aab", &automaton).unwrap(), 3);
/// ```
pub fn aho_corasick<P, T>(patterns: &[P], alphabet: Alphabet) -> Result<Automaton, Error>
where
    P: AsRef<[T]>,
    T: Symbol,
{
    let states = patterns.iter().map(|p| p.as_ref().len()).sum::<usize>() + 1;
    let mut builder = AutomatonBuilder::with_capacity(alphabet, states);
    for pattern in patterns {
        builder.add_pattern(pattern.as_ref())?;
    }

    Ok(builder.build())
}

/// A builder for an [`Automaton`].
///
/// Patterns are inserted into a trie one at a time. Once every pattern has been added,
/// [`build()`](Self::build) freezes the trie into a queryable automaton.
pub struct AutomatonBuilder {
    alphabet: Alphabet,
    nodes: Vec<Node>,
    num_patterns: usize,
}

impl AutomatonBuilder {
    /// Creates a builder holding only the root state.
    #[must_use]
    pub fn new(alphabet: Alphabet) -> Self {
        Self::with_capacity(alphabet, 1)
    }

    /// Creates a builder with space for `states` states without reallocating.
    #[must_use]
    pub fn with_capacity(alphabet: Alphabet, states: usize) -> Self {
        let mut nodes = Vec::with_capacity(states.max(1));
        nodes.push(Node::new(alphabet.size(), NO_NODE, 0));

        Self {
            alphabet,
            nodes,
            num_patterns: 0,
        }
    }

    /// Adds `pattern` to the trie, returning the state at which it ends.
    ///
    /// Patterns are numbered in insertion order starting from 0. A rejected pattern leaves the
    /// builder unchanged and doesn't consume a number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPattern`] if `pattern` is empty, [`Error::SymbolOutOfRange`] if it
    /// contains a symbol outside of the alphabet (with `position` relative to `pattern`), or
    /// [`Error::DuplicatePattern`] if an equal pattern was added before. Match counting counts
    /// every pattern once per occurrence, so a repeated pattern would be counted twice.
    pub fn add_pattern<T: Symbol>(&mut self, pattern: &[T]) -> Result<usize, Error> {
        let index = self.num_patterns;
        if pattern.is_empty() {
            return Err(Error::EmptyPattern { index });
        }
        let ranks = self.alphabet.ranks(pattern, 0)?;

        let mut v = ROOT;
        for c in ranks {
            if self.nodes[v].children[c] == NO_NODE {
                let child = self.nodes.len();
                self.nodes.push(Node::new(self.alphabet.size(), v, c));
                self.nodes[v].children[c] = child;
            }
            v = self.nodes[v].children[c];
        }

        // An existing terminal means the whole path existed already, so nothing was inserted
        if let Some(first) = self.nodes[v].pattern {
            return Err(Error::DuplicatePattern { index, first });
        }
        self.nodes[v].pattern = Some(index);
        self.num_patterns += 1;

        Ok(v)
    }

    /// Returns the number of states created so far, including the root.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of patterns added so far.
    #[must_use]
    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }

    /// Freezes the trie into an [`Automaton`].
    #[must_use]
    pub fn build(self) -> Automaton {
        debug!(
            "built aho-corasick automaton: {} states, {} patterns, alphabet = {}",
            self.nodes.len(),
            self.num_patterns,
            self.alphabet,
        );

        Automaton {
            alphabet: self.alphabet,
            nodes: self.nodes,
            num_patterns: self.num_patterns,
        }
    }
}

/// A dependency of a memoized value that hasn't been computed yet
#[derive(Clone, Copy)]
enum Pending {
    SuffixLink(usize),
    NextState(usize, usize),
}

/// An Aho-Corasick automaton over a set of distinct patterns.
///
/// States are identified by integers in `0..num_states()`, with [`ROOT`] being the empty prefix.
/// Suffix links and transitions are computed lazily on first query and memoized, so queries take
/// `&self` but mutate internal caches. This makes the automaton [`Send`] but not [`Sync`]: share it
/// between threads only behind a lock.
pub struct Automaton {
    alphabet: Alphabet,
    nodes: Vec<Node>,
    num_patterns: usize,
}

impl Automaton {
    /// Returns the alphabet of the automaton.
    #[must_use]
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the number of states, including the root.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of patterns.
    #[must_use]
    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }

    /// Returns `true` if and only if a pattern ends at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if `state` is not a state of the automaton.
    pub fn is_leaf(&self, state: usize) -> Result<bool, Error> {
        self.check_state(state)?;

        Ok(self.nodes[state].pattern.is_some())
    }

    /// Returns the state for the longest proper suffix of `state`'s string that is also a prefix
    /// of some pattern.
    ///
    /// The root and the states directly below it link to the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if `state` is not a state of the automaton.
    pub fn suffix_link(&self, state: usize) -> Result<usize, Error> {
        self.check_state(state)?;

        Ok(self.link(state))
    }

    /// Returns the state reached from `state` by reading `symbol`.
    ///
    /// This follows a trie edge if one exists and otherwise falls back along suffix links,
    /// bottoming out at the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if `state` is not a state of the automaton or
    /// [`Error::SymbolOutOfRange`] (with position 0) if `symbol` is outside of the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use strix::{Alphabet, ROOT};
    ///
    /// let patterns: [&[u8]; 2] = [b"ab", b"b"];
    /// let automaton = strix::aho_corasick(&patterns, Alphabet::fit(b"ab").unwrap()).unwrap();
    ///
    /// let a = automaton.next_state(ROOT, b'a'.into()).unwrap();
    /// let ab = automaton.next_state(a, b'b'.into()).unwrap();
    /// assert!(automaton.is_leaf(ab).unwrap());
    /// assert_eq!(automaton.next_state(a, b'a'.into()).unwrap(), a);
    /// ```
    pub fn next_state(&self, state: usize, symbol: u32) -> Result<usize, Error> {
        self.check_state(state)?;
        let c = self.alphabet.rank(symbol).ok_or(Error::SymbolOutOfRange {
            position: 0,
            symbol,
            alphabet: self.alphabet,
        })?;

        Ok(self.transition(state, c))
    }

    /// Creates a [`Scanner`] positioned at the root.
    #[must_use]
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(self)
    }

    fn check_state(&self, state: usize) -> Result<(), Error> {
        if state < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::UnknownState {
                state,
                len: self.nodes.len(),
            })
        }
    }

    pub(crate) fn pattern_at(&self, state: usize) -> Option<usize> {
        self.nodes[state].pattern
    }

    /// Returns the suffix link of `state`, computing it if necessary.
    pub(crate) fn link(&self, state: usize) -> usize {
        let link = self.nodes[state].suffix_link.get();
        if link != UNKNOWN {
            return link;
        }

        self.resolve(Pending::SuffixLink(state));
        self.nodes[state].suffix_link.get()
    }

    /// Returns the transition from `state` on the symbol with rank `c`, computing it if
    /// necessary.
    pub(crate) fn transition(&self, state: usize, c: usize) -> usize {
        let next = self.nodes[state].next_state[c].get();
        if next != UNKNOWN {
            return next;
        }

        self.resolve(Pending::NextState(state, c));
        self.nodes[state].next_state[c].get()
    }

    /// Computes `goal` and everything it depends on.
    ///
    /// Suffix links and transitions are mutually recursive. Chains of single-child states can be
    /// as deep as the longest pattern, so the recursion runs on an explicit stack instead of the
    /// call stack.
    fn resolve(&self, goal: Pending) {
        let mut stack = vec![goal];
        while let Some(&task) = stack.last() {
            match self.try_resolve(task) {
                Some(dependency) => stack.push(dependency),
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Computes `task` if all of its dependencies are known, otherwise returns one that isn't.
    ///
    /// Every dependency belongs to a strictly shallower state, or is the suffix link of the same
    /// state when computing a transition, so resolution always terminates.
    fn try_resolve(&self, task: Pending) -> Option<Pending> {
        match task {
            Pending::SuffixLink(v) => {
                let node = &self.nodes[v];
                if node.suffix_link.get() != UNKNOWN {
                    return None;
                }
                if v == ROOT || node.parent == ROOT {
                    node.suffix_link.set(ROOT);
                    return None;
                }

                let parent_link = self.nodes[node.parent].suffix_link.get();
                if parent_link == UNKNOWN {
                    return Some(Pending::SuffixLink(node.parent));
                }
                let next = self.nodes[parent_link].next_state[node.symbol].get();
                if next == UNKNOWN {
                    return Some(Pending::NextState(parent_link, node.symbol));
                }

                node.suffix_link.set(next);
                None
            }
            Pending::NextState(v, c) => {
                let node = &self.nodes[v];
                if node.next_state[c].get() != UNKNOWN {
                    return None;
                }
                if node.children[c] != NO_NODE {
                    node.next_state[c].set(node.children[c]);
                    return None;
                }
                if v == ROOT {
                    node.next_state[c].set(ROOT);
                    return None;
                }

                let link = node.suffix_link.get();
                if link == UNKNOWN {
                    return Some(Pending::SuffixLink(v));
                }
                let next = self.nodes[link].next_state[c].get();
                if next == UNKNOWN {
                    return Some(Pending::NextState(link, c));
                }

                node.next_state[c].set(next);
                None
            }
        }
    }
}

/// Counts every occurrence of every pattern of `automaton` in `text`.
///
/// Occurrences may overlap, and occurrences of different patterns at the same position are all
/// counted. This operation is *O*(*n*) once the automaton's caches are warm.
///
/// # Errors
///
/// Returns [`Error::SymbolOutOfRange`] if `text` contains a symbol outside of the automaton's
/// alphabet.
///
/// # Examples
///
/// ```
/// use strix::Alphabet;
///
/// let patterns: [&[u8]; 3] = [b"he", b"she", b"hers"];
/// let automaton = strix::aho_corasick(&patterns, Alphabet::bytes()).unwrap();
///
/// assert_eq!(strix::count_matches(b"ushers", &automaton).unwrap(), 3);
/// ```
pub fn count_matches<T: Symbol>(text: &[T], automaton: &Automaton) -> Result<u64, Error> {
    automaton.scanner().feed(text)
}

/// A streaming match counter over an [`Automaton`].
///
/// Text can be fed in arbitrary chunks: feeding `a` and then `b` counts exactly the matches that
/// feeding their concatenation would, including matches that straddle the chunk boundary.
///
/// # Examples
///
/// ```
/// use strix::Alphabet;
///
/// let patterns: [&[u8]; 1] = [b"abc"];
/// let automaton = strix::aho_corasick(&patterns, Alphabet::bytes()).unwrap();
/// let mut scanner = automaton.scanner();
///
/// assert_eq!(scanner.feed(b"xxab").unwrap(), 0);
/// assert_eq!(scanner.feed(b"cabc").unwrap(), 2);
/// assert_eq!(scanner.total(), 2);
/// ```
pub struct Scanner<'a> {
    automaton: &'a Automaton,
    state: usize,
    /// Number of patterns ending at each state or at any state on its suffix link chain
    matches: Vec<Option<u64>>,
    stack: Vec<usize>,
    total: u64,
}

impl<'a> Scanner<'a> {
    fn new(automaton: &'a Automaton) -> Self {
        let mut matches = vec![None; automaton.num_states()];
        matches[ROOT] = Some(0);

        Self {
            automaton,
            state: ROOT,
            matches,
            stack: Vec::new(),
            total: 0,
        }
    }

    /// Advances over `chunk`, returning the number of matches ending inside it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SymbolOutOfRange`] (with `position` relative to `chunk`) if `chunk`
    /// contains a symbol outside of the automaton's alphabet. The scanner is left unchanged in
    /// that case.
    pub fn feed<T: Symbol>(&mut self, chunk: &[T]) -> Result<u64, Error> {
        let ranks = self.automaton.alphabet.ranks(chunk, 0)?;

        let mut found = 0;
        for c in ranks {
            self.state = self.automaton.transition(self.state, c);
            found += self.matches_at(self.state);
        }
        self.total += found;

        Ok(found)
    }

    /// Returns the state the scanner is currently in.
    #[must_use]
    pub fn state(&self) -> usize {
        self.state
    }

    /// Returns the number of matches found since creation or the last reset.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the scanner to the root and clears the running total.
    ///
    /// Cached per-state counts are kept since they only depend on the automaton.
    pub fn reset(&mut self) {
        self.state = ROOT;
        self.total = 0;
    }

    /// Returns the number of patterns ending at `state`, computing it if necessary.
    ///
    /// Walks up suffix links until it finds a state whose count is known, then fills in the
    /// counts on the way back down. Each state's count is computed once.
    fn matches_at(&mut self, state: usize) -> u64 {
        let mut u = state;
        let mut known = loop {
            match self.matches[u] {
                Some(count) => break count,
                None => {
                    self.stack.push(u);
                    u = self.automaton.link(u);
                }
            }
        };

        while let Some(v) = self.stack.pop() {
            known += u64::from(self.automaton.pattern_at(v).is_some());
            self.matches[v] = Some(known);
        }

        known
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn automaton(patterns: &[&str]) -> Automaton {
        let patterns: Vec<&[u8]> = patterns.iter().map(|p| p.as_bytes()).collect();
        aho_corasick(&patterns, Alphabet::from_chars('a', 'z')).unwrap()
    }

    #[test]
    fn overlapping_prefix_patterns() {
        let automaton = automaton(&["a", "ab"]);

        assert_eq!(count_matches(b"aab", &automaton).unwrap(), 3);
    }

    #[test]
    fn classic_dictionary() {
        let automaton = automaton(&["he", "she", "his", "hers"]);

        assert_eq!(count_matches(b"ahishers", &automaton).unwrap(), 4);
    }

    #[test]
    fn overlapping_occurrences() {
        let automaton = automaton(&["aa"]);

        assert_eq!(count_matches(b"aaaa", &automaton).unwrap(), 3);
    }

    #[test]
    fn empty_text() {
        let automaton = automaton(&["a"]);

        assert_eq!(count_matches::<u8>(&[], &automaton).unwrap(), 0);
    }

    #[test]
    fn states_and_leaves() {
        let automaton = automaton(&["ab", "abc", "b"]);

        // root, a, ab, abc, b
        assert_eq!(automaton.num_states(), 5);
        assert_eq!(automaton.num_patterns(), 3);
        assert!(!automaton.is_leaf(ROOT).unwrap());
        assert!(!automaton.is_leaf(1).unwrap());
        assert!(automaton.is_leaf(2).unwrap());
        assert!(automaton.is_leaf(3).unwrap());
        assert!(automaton.is_leaf(4).unwrap());
    }

    #[test]
    fn suffix_links() {
        let automaton = automaton(&["ab", "abc", "b", "bc"]);
        // root 0, a 1, ab 2, abc 3, b 4, bc 5
        assert_eq!(automaton.suffix_link(ROOT).unwrap(), ROOT);
        assert_eq!(automaton.suffix_link(1).unwrap(), ROOT);
        assert_eq!(automaton.suffix_link(4).unwrap(), ROOT);
        assert_eq!(automaton.suffix_link(2).unwrap(), 4);
        assert_eq!(automaton.suffix_link(3).unwrap(), 5);
        assert_eq!(automaton.suffix_link(5).unwrap(), ROOT);
    }

    #[test]
    fn transitions_fall_back() {
        let automaton = automaton(&["abc", "bd"]);
        // root 0, a 1, ab 2, abc 3, b 4, bd 5
        let ab = automaton.next_state(1, 'b'.into()).unwrap();
        assert_eq!(ab, 2);
        assert_eq!(automaton.next_state(ab, 'd'.into()).unwrap(), 5);
        assert_eq!(automaton.next_state(ab, 'a'.into()).unwrap(), 1);
        assert_eq!(automaton.next_state(ab, 'z'.into()).unwrap(), ROOT);
        assert_eq!(automaton.next_state(ROOT, 'q'.into()).unwrap(), ROOT);
    }

    #[test]
    fn long_chain_resolves_without_recursion() {
        let pattern = vec![b'a'; 100_000];
        let patterns = [pattern.as_slice()];
        let automaton = aho_corasick(&patterns, Alphabet::fit(b"ab").unwrap()).unwrap();
        let deepest = automaton.num_states() - 1;

        assert_eq!(automaton.suffix_link(deepest).unwrap(), deepest - 1);
        assert_eq!(count_matches(&pattern, &automaton).unwrap(), 1);
    }

    #[test]
    fn duplicate_pattern_rejected() {
        let mut builder = AutomatonBuilder::new(Alphabet::from_chars('a', 'z'));
        builder.add_pattern(b"ab").unwrap();
        builder.add_pattern(b"b").unwrap();
        let states = builder.num_states();

        assert_eq!(
            builder.add_pattern(b"ab"),
            Err(Error::DuplicatePattern { index: 2, first: 0 }),
        );
        assert_eq!(builder.num_states(), states);
        assert_eq!(builder.num_patterns(), 2);
    }

    #[test]
    fn empty_pattern_rejected() {
        let mut builder = AutomatonBuilder::new(Alphabet::from_chars('a', 'z'));

        assert_eq!(
            builder.add_pattern::<u8>(&[]),
            Err(Error::EmptyPattern { index: 0 }),
        );
    }

    #[test]
    fn pattern_outside_alphabet_inserts_nothing() {
        let mut builder = AutomatonBuilder::new(Alphabet::from_chars('a', 'c'));

        assert!(matches!(
            builder.add_pattern(b"abz"),
            Err(Error::SymbolOutOfRange { position: 2, .. }),
        ));
        assert_eq!(builder.num_states(), 1);
    }

    #[test]
    fn unknown_state() {
        let automaton = automaton(&["a"]);

        assert_eq!(
            automaton.suffix_link(2),
            Err(Error::UnknownState { state: 2, len: 2 }),
        );
        assert!(automaton.is_leaf(7).is_err());
        assert!(automaton.next_state(9, 'a'.into()).is_err());
    }

    #[test]
    fn scanner_chunks_and_reset() {
        let automaton = automaton(&["abc", "c"]);
        let mut scanner = automaton.scanner();

        assert_eq!(scanner.feed(b"ab").unwrap(), 0);
        assert_eq!(scanner.feed(b"c").unwrap(), 2);
        assert!(scanner.feed(b"A").is_err());
        assert_eq!(scanner.total(), 2);

        scanner.reset();
        assert_eq!(scanner.state(), ROOT);
        assert_eq!(scanner.feed(b"cc").unwrap(), 2);
        assert_eq!(scanner.total(), 2);
    }
}
