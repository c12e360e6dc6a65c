//! N-gram keys and window extraction.
//!
//! N-grams are ordered tuples of token strings. Token strings are interned
//! once in a `TokenDictionary` so that index keys and the values carried by
//! every `Position` share the same allocations.

use crate::position::Position;
use crate::token::Token;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// An ordered tuple of token strings with structural equality and hashing
pub type Ngram = Arc<[Arc<str>]>;

/// Build an n-gram from plain strings (not interned)
pub fn ngram_from_strs(tokens: &[&str]) -> Ngram {
    tokens.iter().map(|t| Arc::<str>::from(*t)).collect()
}

/// Interning table for token strings
#[derive(Debug, Clone, Default)]
pub struct TokenDictionary {
    tokens: FxHashSet<Arc<str>>,
}

impl TokenDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the interned string, inserting it if this is a new token
    pub fn intern(&mut self, token: &str) -> Arc<str> {
        if let Some(existing) = self.tokens.get(token) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(token);
        self.tokens.insert(Arc::clone(&interned));
        interned
    }

    /// Get the interned string if the token was seen before
    #[inline]
    pub fn get(&self, token: &str) -> Option<&Arc<str>> {
        self.tokens.get(token)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Key for a window of tokens, interning any new token strings
pub(crate) fn intern_window(dictionary: &mut TokenDictionary, window: &[Token]) -> Vec<Arc<str>> {
    window.iter().map(|t| dictionary.intern(&t.value)).collect()
}

/// Span covering a non-empty window of consecutive tokens
pub(crate) fn window_position(window: &[Token]) -> Position {
    let first = &window[0];
    let last = &window[window.len() - 1];
    Position::new(
        first.start,
        last.end,
        first.start_line,
        first.start_char,
        last.end_line,
        last.end_char,
    )
}
