//! Spans over a token stream.
//!
//! A `Position` records where something occurs in a document twice over:
//! as inclusive token offsets and as line/character coordinates. Positions
//! created for a single n-gram also carry the n-gram itself.

use crate::ngram::{ngram_from_strs, Ngram};
use serde::{Deserialize, Serialize};

/// An immutable span over a tokenized document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// First token offset (inclusive)
    pub start: usize,

    /// Last token offset (inclusive)
    pub end: usize,

    pub start_line: usize,
    pub start_char: usize,
    pub end_line: usize,

    /// Character just past the last token on `end_line`
    pub end_char: usize,

    /// The n-gram this span was created for, unset for merged spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Ngram>,
}

impl Position {
    /// Create a span without an n-gram value
    pub fn new(
        start: usize,
        end: usize,
        start_line: usize,
        start_char: usize,
        end_line: usize,
        end_char: usize,
    ) -> Self {
        debug_assert!(start <= end, "position start {} > end {}", start, end);
        Self {
            start,
            end,
            start_line,
            start_char,
            end_line,
            end_char,
            value: None,
        }
    }

    /// Attach an n-gram value built from plain strings
    pub fn with_value(mut self, tokens: &[&str]) -> Self {
        self.value = Some(ngram_from_strs(tokens));
        self
    }

    /// Attach an already interned n-gram
    pub(crate) fn with_ngram(mut self, ngram: Ngram) -> Self {
        self.value = Some(ngram);
        self
    }

    /// Number of tokens covered by this span
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A position always covers at least one token
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `other` lies within this span's token bounds
    #[inline]
    pub fn contains(&self, other: &Position) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Token values of the n-gram, if any
    pub fn tokens(&self) -> Option<Vec<&str>> {
        self.value
            .as_ref()
            .map(|ngram| ngram.iter().map(|t| t.as_ref()).collect())
    }
}
