use crate::align::{chain_across_wildcards, cluster_hits, remove_subsumed, AlignedMatch, Hit};
use crate::error::Result;
use crate::index::{DocId, Index};
use crate::ngram::window_position;
use crate::token::{debug_assert_monotonic, Token};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Matches per document identifier, documents without matches omitted
pub type MatchResults = BTreeMap<String, Vec<AlignedMatch>>;

/// How much of an indexed document a match must cover
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Report every aligned region, however short
    #[default]
    Partial,

    /// Report only regions reproducing a whole indexed document
    Perfect,
}

/// Match options
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    pub mode: MatchMode,

    /// Maximum number of matches to return per document
    pub limit: Option<usize>,
}

impl MatchOptions {
    pub fn perfect() -> Self {
        Self {
            mode: MatchMode::Perfect,
            limit: None,
        }
    }
}

impl Index {
    /// Match a tokenized query against the index
    pub fn match_query<I>(&self, query: I, perfect: bool) -> Result<MatchResults>
    where
        I: IntoIterator<Item = Token>,
    {
        let options = if perfect {
            MatchOptions::perfect()
        } else {
            MatchOptions::default()
        };
        self.match_with_options(query, &options)
    }

    /// Match a tokenized query with options
    pub fn match_with_options<I>(&self, query: I, options: &MatchOptions) -> Result<MatchResults>
    where
        I: IntoIterator<Item = Token>,
    {
        let tokens: Vec<Token> = query.into_iter().collect();
        self.match_tokens(&tokens, options)
    }

    /// Match several independent queries in parallel.
    ///
    /// Results are returned in the order of `queries`.
    pub fn match_many(
        &self,
        queries: &[Vec<Token>],
        options: &MatchOptions,
    ) -> Vec<Result<MatchResults>> {
        queries
            .par_iter()
            .map(|query| self.match_tokens(query, options))
            .collect()
    }

    /// Match a slice of query tokens
    pub fn match_tokens(&self, query: &[Token], options: &MatchOptions) -> Result<MatchResults> {
        debug_assert_monotonic(query);

        let hits_by_doc = self.collect_hits(query);
        let hit_count: usize = hits_by_doc.values().map(Vec::len).sum();

        let mut results = MatchResults::new();
        for (doc, hits) in hits_by_doc {
            let entry = self.document(doc);
            log::trace!("document {}: {} hits", entry.id, hits.len());

            let runs = cluster_hits(hits, &entry.wildcards)?;
            let mut matches = chain_across_wildcards(runs, &entry.wildcards)?;

            if options.mode == MatchMode::Perfect {
                matches.retain(|m| m.index.len() == entry.token_count);
            }

            let mut matches = remove_subsumed(matches);
            if let Some(limit) = options.limit {
                matches.truncate(limit);
            }

            if !matches.is_empty() {
                results.insert(entry.id.clone(), matches);
            }
        }

        log::debug!(
            "matched {} query tokens: {} hits, {} documents matched ({:?})",
            query.len(),
            hit_count,
            results.len(),
            options.mode
        );

        Ok(results)
    }

    /// Probe every query window, longest order first, and group hits by document
    fn collect_hits(&self, query: &[Token]) -> BTreeMap<DocId, Vec<Hit>> {
        let mut hits: BTreeMap<DocId, Vec<Hit>> = BTreeMap::new();

        // Tokens absent from the dictionary cannot be part of any indexed n-gram
        let interned: Vec<Option<Arc<str>>> = query
            .iter()
            .map(|t| self.dictionary.get(&t.value).cloned())
            .collect();

        for order in (1..=self.ngram_len()).rev() {
            let table = &self.orders[order - 1];
            if table.is_empty() || query.len() < order {
                continue;
            }

            for start in 0..=query.len() - order {
                let key: Option<Vec<Arc<str>>> =
                    interned[start..start + order].iter().cloned().collect();
                let Some(key) = key else {
                    continue;
                };
                let Some((ngram, postings)) = table.get(&key) else {
                    continue;
                };

                let query_pos =
                    window_position(&query[start..start + order]).with_ngram(Arc::clone(ngram));
                for (doc, positions) in postings.iter() {
                    let doc_hits = hits.entry(doc).or_default();
                    doc_hits.extend(positions.iter().map(|index_pos| Hit {
                        query: query_pos.clone(),
                        index: index_pos.clone(),
                    }));
                }
            }
        }

        hits
    }
}
