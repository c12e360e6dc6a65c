use crate::error::{IndexError, Result};
use crate::ngram::{Ngram, TokenDictionary};
use crate::position::Position;
use crate::token::WildcardBoundaries;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default maximum n-gram order
pub const DEFAULT_NGRAM_LEN: usize = 3;

/// Dense internal document number, assigned in indexing order
pub type DocId = u32;

/// Configuration for building an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Maximum n-gram order; orders `1..=ngram_len` are indexed
    pub ngram_len: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            ngram_len: DEFAULT_NGRAM_LEN,
        }
    }
}

// ============================================================================
// Postings - documents and positions for one n-gram
// ============================================================================

/// Every document and position where one n-gram occurs.
///
/// Entries are ordered by document number, which is the order documents were
/// first indexed. Positions keep occurrence order, repeats included.
#[derive(Debug, Clone, Default)]
pub struct Postings {
    entries: Vec<(DocId, Vec<Position>)>,
}

impl Postings {
    /// Record one occurrence of the n-gram in a document
    pub(crate) fn push(&mut self, doc: DocId, position: Position) {
        if let Some((last, positions)) = self.entries.last_mut() {
            if *last == doc {
                positions.push(position);
                return;
            }
        }

        // Only a re-indexed document lands before the tail
        match self.entries.binary_search_by_key(&doc, |(d, _)| *d) {
            Ok(idx) => self.entries[idx].1.push(position),
            Err(idx) => self.entries.insert(idx, (doc, vec![position])),
        }
    }

    /// Positions in one document
    pub fn get(&self, doc: DocId) -> Option<&[Position]> {
        self.entries
            .binary_search_by_key(&doc, |(d, _)| *d)
            .ok()
            .map(|idx| self.entries[idx].1.as_slice())
    }

    /// Iterate `(document, positions)` in indexing order
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &[Position])> + '_ {
        self.entries
            .iter()
            .map(|(doc, positions)| (*doc, positions.as_slice()))
    }

    /// Number of documents containing the n-gram
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// NgramIndex - postings for a single order
// ============================================================================

/// Index mapping n-grams of one order to their postings
#[derive(Debug, Clone)]
pub struct NgramIndex {
    order: usize,
    postings: FxHashMap<Ngram, Postings>,
}

impl NgramIndex {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            postings: FxHashMap::default(),
        }
    }

    /// Add an occurrence of `ngram` in `doc`
    pub(crate) fn add(&mut self, ngram: Ngram, doc: DocId, position: Position) {
        debug_assert_eq!(ngram.len(), self.order);
        self.postings.entry(ngram).or_default().push(doc, position);
    }

    /// Look up an n-gram, returning the stored key alongside its postings
    #[inline]
    pub fn get(&self, ngram: &[Arc<str>]) -> Option<(&Ngram, &Postings)> {
        self.postings.get_key_value(ngram)
    }

    /// The n-gram order of this table
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ngram, &Postings)> + '_ {
        self.postings.iter()
    }
}

// ============================================================================
// Index - all orders plus the document registry
// ============================================================================

#[derive(Debug, Clone)]
pub(crate) struct DocumentEntry {
    pub(crate) id: String,
    pub(crate) token_count: usize,
    pub(crate) wildcards: WildcardBoundaries,
}

/// Snapshot statistics for an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub ngram_len: usize,
    pub document_count: usize,
    pub total_tokens: usize,
    /// Distinct n-grams per order, starting at order 1
    pub ngrams_per_order: Vec<usize>,
}

/// The in-memory n-gram inverted index.
///
/// Built once with `index_one`/`index_many`, then queried read-only with
/// the matching methods.
#[derive(Debug, Clone)]
pub struct Index {
    config: IndexConfig,

    /// One table per order, `orders[k - 1]` holds order `k`
    pub(crate) orders: Box<[NgramIndex]>,

    /// Interned token strings shared by all keys and positions
    pub(crate) dictionary: TokenDictionary,

    pub(crate) documents: Vec<DocumentEntry>,

    doc_lookup: FxHashMap<String, DocId>,
}

impl Index {
    /// Create an empty index for orders `1..=ngram_len`
    pub fn new(ngram_len: usize) -> Result<Self> {
        Self::with_config(IndexConfig { ngram_len })
    }

    /// Create an empty index from a configuration
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        if config.ngram_len == 0 {
            return Err(IndexError::InvalidConfig(
                "ngram_len must be at least 1".to_string(),
            ));
        }

        let orders = (1..=config.ngram_len).map(NgramIndex::new).collect();

        Ok(Self {
            config,
            orders,
            dictionary: TokenDictionary::new(),
            documents: Vec::new(),
            doc_lookup: FxHashMap::default(),
        })
    }

    /// Register a document and return its number and whether it was new
    pub(crate) fn register_document(&mut self, id: &str) -> (DocId, bool) {
        if let Some(&doc) = self.doc_lookup.get(id) {
            return (doc, false);
        }

        let doc = self.documents.len() as DocId;
        self.documents.push(DocumentEntry {
            id: id.to_string(),
            token_count: 0,
            wildcards: WildcardBoundaries::default(),
        });
        self.doc_lookup.insert(id.to_string(), doc);
        (doc, true)
    }

    pub(crate) fn document(&self, doc: DocId) -> &DocumentEntry {
        &self.documents[doc as usize]
    }

    pub(crate) fn document_mut(&mut self, doc: DocId) -> &mut DocumentEntry {
        &mut self.documents[doc as usize]
    }

    /// Total tokens indexed for a document
    pub fn get_tokens_count(&self, document_id: &str) -> Result<usize> {
        self.doc_lookup
            .get(document_id)
            .map(|&doc| self.document(doc).token_count)
            .ok_or_else(|| IndexError::UnknownDocument(document_id.to_string()))
    }

    /// Document identifier for an internal document number
    pub fn document_id(&self, doc: DocId) -> Option<&str> {
        self.documents.get(doc as usize).map(|d| d.id.as_str())
    }

    /// Maximum n-gram order
    pub fn ngram_len(&self) -> usize {
        self.config.ngram_len
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Table for order `k`, `None` outside `1..=ngram_len`
    pub fn order(&self, k: usize) -> Option<&NgramIndex> {
        k.checked_sub(1).and_then(|i| self.orders.get(i))
    }

    /// Postings of an n-gram as `(document id, positions)` in indexing order.
    ///
    /// The order is taken from the n-gram's length.
    pub fn postings(&self, ngram: &[&str]) -> Option<Vec<(&str, &[Position])>> {
        let table = self.order(ngram.len())?;
        let key = ngram
            .iter()
            .map(|t| self.dictionary.get(t).cloned())
            .collect::<Option<Vec<_>>>()?;
        let (_, postings) = table.get(&key)?;

        Some(
            postings
                .iter()
                .map(|(doc, positions)| (self.document(doc).id.as_str(), positions))
                .collect(),
        )
    }

    /// Number of indexed documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Indexed document identifiers in indexing order
    pub fn documents(&self) -> impl Iterator<Item = &str> + '_ {
        self.documents.iter().map(|d| d.id.as_str())
    }

    /// Number of distinct tokens seen while indexing
    pub fn vocabulary_size(&self) -> usize {
        self.dictionary.len()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            ngram_len: self.config.ngram_len,
            document_count: self.documents.len(),
            total_tokens: self.documents.iter().map(|d| d.token_count).sum(),
            ngrams_per_order: self.orders.iter().map(NgramIndex::len).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: usize) -> Position {
        Position::new(offset, offset, 0, offset * 2, 0, offset * 2 + 1)
    }

    #[test]
    fn test_new_index() {
        let index = Index::new(3).unwrap();
        assert_eq!(index.ngram_len(), 3);
        assert_eq!(index.document_count(), 0);
        assert_eq!(index.stats().ngrams_per_order, vec![0, 0, 0]);
    }

    #[test]
    fn test_zero_ngram_len_rejected() {
        assert!(matches!(
            Index::new(0),
            Err(IndexError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let index = Index::with_config(IndexConfig::default()).unwrap();
        assert_eq!(index.ngram_len(), DEFAULT_NGRAM_LEN);
        assert_eq!(index.config(), &IndexConfig { ngram_len: 3 });
        assert_eq!(index.vocabulary_size(), 0);
    }

    #[test]
    fn test_order_bounds() {
        let index = Index::new(2).unwrap();
        assert!(index.order(0).is_none());
        assert_eq!(index.order(1).unwrap().order(), 1);
        assert_eq!(index.order(2).unwrap().order(), 2);
        assert!(index.order(3).is_none());
    }

    #[test]
    fn test_register_document() {
        let mut index = Index::new(1).unwrap();
        assert_eq!(index.register_document("bsd-new"), (0, true));
        assert_eq!(index.register_document("mit"), (1, true));
        assert_eq!(index.register_document("bsd-new"), (0, false));

        assert_eq!(index.document_count(), 2);
        assert_eq!(index.document_id(1), Some("mit"));
        assert_eq!(index.document_id(7), None);
    }

    #[test]
    fn test_unknown_document_tokens_count() {
        let index = Index::new(1).unwrap();
        assert_eq!(
            index.get_tokens_count("gpl"),
            Err(IndexError::UnknownDocument("gpl".to_string()))
        );
    }

    #[test]
    fn test_postings_keep_document_order() {
        let mut postings = Postings::default();
        postings.push(0, pos(1));
        postings.push(0, pos(4));
        postings.push(2, pos(0));
        postings.push(5, pos(3));

        let docs: Vec<DocId> = postings.iter().map(|(d, _)| d).collect();
        assert_eq!(docs, vec![0, 2, 5]);
        assert_eq!(postings.get(0).unwrap(), &[pos(1), pos(4)]);
        assert_eq!(postings.len(), 3);
    }

    #[test]
    fn test_postings_merge_reindexed_document() {
        let mut postings = Postings::default();
        postings.push(0, pos(1));
        postings.push(1, pos(2));
        postings.push(0, pos(9));

        assert_eq!(postings.len(), 2);
        assert_eq!(postings.get(0).unwrap(), &[pos(1), pos(9)]);
        assert!(postings.get(3).is_none());
    }

    #[test]
    fn test_ngram_index_get_returns_stored_key() {
        let mut dict = TokenDictionary::new();
        let key: Ngram = vec![dict.intern("brown"), dict.intern("fox")].into();

        let mut table = NgramIndex::new(2);
        table.add(Arc::clone(&key), 0, pos(2));
        table.add(Arc::clone(&key), 0, pos(5));

        let probe = vec![dict.intern("brown"), dict.intern("fox")];
        let (stored, postings) = table.get(&probe).unwrap();
        assert!(Arc::ptr_eq(stored, &key));
        assert_eq!(postings.get(0).unwrap().len(), 2);
        assert_eq!(table.len(), 1);
    }
}
