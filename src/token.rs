//! Tokens as handed over by an external tokenizer.
//!
//! Tokenization happens outside this crate. A tokenizer supplies tokens in
//! stream order with their token offsets and line/char coordinates, and marks
//! where an author-defined wildcard run was removed from a template document.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// A single token with its coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Normalized token text
    pub value: String,

    /// Token offsets (inclusive), normally equal
    pub start: usize,
    pub end: usize,

    pub start_line: usize,
    pub start_char: usize,
    pub end_line: usize,
    pub end_char: usize,

    /// A wildcard run sits between this token and the previous one
    #[serde(default)]
    pub after_wildcard: bool,
}

impl Token {
    /// Create a token occupying a single offset
    pub fn new(
        value: impl Into<String>,
        offset: usize,
        start_line: usize,
        start_char: usize,
        end_line: usize,
        end_char: usize,
    ) -> Self {
        Self {
            value: value.into(),
            start: offset,
            end: offset,
            start_line,
            start_char,
            end_line,
            end_char,
            after_wildcard: false,
        }
    }

    /// Mark this token as following a wildcard run
    pub fn after_wildcard(mut self) -> Self {
        self.after_wildcard = true;
        self
    }

    /// The token's own span, without a value
    pub fn span(&self) -> Position {
        Position::new(
            self.start,
            self.end,
            self.start_line,
            self.start_char,
            self.end_line,
            self.end_char,
        )
    }
}

/// Check the tokenizer contract in debug builds: offsets never go backwards.
pub(crate) fn debug_assert_monotonic(tokens: &[Token]) {
    if cfg!(debug_assertions) {
        for pair in tokens.windows(2) {
            debug_assert!(
                pair[0].start <= pair[0].end && pair[0].start <= pair[1].start,
                "non-monotonic token offsets: {:?} then {:?}",
                (pair[0].start, pair[0].end),
                (pair[1].start, pair[1].end)
            );
        }
    }
}

/// Token offsets immediately preceded by a wildcard run, kept sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardBoundaries {
    offsets: Vec<usize>,
}

impl WildcardBoundaries {
    /// Collect boundaries from tokens flagged `after_wildcard`.
    ///
    /// A wildcard before the first token bounds nothing and is ignored.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut offsets: Vec<usize> = tokens
            .iter()
            .skip(1)
            .filter(|t| t.after_wildcard)
            .map(|t| t.start)
            .collect();
        offsets.sort_unstable();
        offsets.dedup();
        Self { offsets }
    }

    /// True if a span `start..=end` has tokens on both sides of a wildcard
    #[inline]
    pub fn crosses(&self, start: usize, end: usize) -> bool {
        let idx = self.offsets.partition_point(|&b| b <= start);
        self.offsets.get(idx).is_some_and(|&b| b <= end)
    }

    /// True if a wildcard sits right before `offset`
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        self.offsets.binary_search(&offset).is_ok()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
