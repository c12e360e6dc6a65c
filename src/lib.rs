//! N-gram inverted index for locating reference texts inside documents
//!
//! Reference documents (license texts, notices) are indexed as n-grams of
//! every order up to a configured maximum. A query document is probed against
//! the index and the scattered n-gram hits are collapsed into aligned spans
//! with exact token, line and character coordinates.
//!
//! Tokenization is left to the caller: documents are handed over as streams
//! of [`Token`]s.
//!
//! # Example
//!
//! ```
//! use ngram_match::{Index, Token};
//!
//! let reference = vec![
//!     Token::new("the", 0, 0, 0, 0, 3),
//!     Token::new("quick", 1, 0, 4, 0, 9),
//!     Token::new("brown", 2, 0, 10, 0, 15),
//!     Token::new("fox", 3, 0, 16, 0, 19),
//! ];
//!
//! let mut index = Index::new(2).unwrap();
//! index.index_one("fox", reference, false);
//!
//! let query = vec![
//!     Token::new("brown", 0, 0, 0, 0, 5),
//!     Token::new("fox", 1, 0, 6, 0, 9),
//! ];
//! let results = index.match_query(query, false).unwrap();
//!
//! let found = &results["fox"][0];
//! assert_eq!((found.index.start, found.index.end), (2, 3));
//! ```

mod align;
mod error;
mod index;
mod indexer;
mod merge;
mod ngram;
mod position;
mod query;
mod token;

#[cfg(test)]
mod test_utils;

// Re-export public API
pub use align::AlignedMatch;
pub use error::{IndexError, Result};
pub use index::{
    DocId, Index, IndexConfig, IndexStats, NgramIndex, Postings, DEFAULT_NGRAM_LEN,
};
pub use merge::{merge_aligned_positions, merge_positions};
pub use ngram::{ngram_from_strs, Ngram, TokenDictionary};
pub use position::Position;
pub use query::{MatchMode, MatchOptions, MatchResults};
pub use token::{Token, WildcardBoundaries};
