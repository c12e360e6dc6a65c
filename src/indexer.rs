//! Populating the index from tokenized reference documents.

use crate::index::Index;
use crate::ngram::{intern_window, window_position, Ngram};
use crate::token::{debug_assert_monotonic, Token, WildcardBoundaries};

impl Index {
    /// Index one tokenized document under `document_id`.
    ///
    /// Every window of `k` consecutive tokens, for each order `k` in
    /// `1..=ngram_len`, is recorded with its span. With `template` set,
    /// windows with tokens on both sides of a wildcard are skipped.
    ///
    /// Indexing the same identifier twice merges both postings under that
    /// identifier; the token count is that of the latest call.
    pub fn index_one<I>(&mut self, document_id: &str, tokens: I, template: bool)
    where
        I: IntoIterator<Item = Token>,
    {
        let tokens: Vec<Token> = tokens.into_iter().collect();
        debug_assert_monotonic(&tokens);

        let (doc, is_new) = self.register_document(document_id);
        if !is_new {
            log::warn!(
                "document {} indexed more than once, merging postings",
                document_id
            );
        }

        let wildcards = if template {
            WildcardBoundaries::from_tokens(&tokens)
        } else {
            WildcardBoundaries::default()
        };

        let mut skipped = 0usize;
        for order in 1..=self.ngram_len() {
            for window in tokens.windows(order) {
                let first = &window[0];
                let last = &window[order - 1];
                if wildcards.crosses(first.start, last.end) {
                    skipped += 1;
                    continue;
                }

                let ngram: Ngram = intern_window(&mut self.dictionary, window).into();
                let position = window_position(window).with_ngram(ngram.clone());
                self.orders[order - 1].add(ngram, doc, position);
            }
        }

        log::debug!(
            "indexed document {} ({} tokens, {} wildcards, {} windows skipped)",
            document_id,
            tokens.len(),
            wildcards.len(),
            skipped
        );

        let entry = self.document_mut(doc);
        entry.token_count = tokens.len();
        entry.wildcards = wildcards;
    }

    /// Index a batch of `(document id, tokens)` pairs in order
    pub fn index_many<S, I, D>(&mut self, documents: D, template: bool)
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Token>,
        D: IntoIterator<Item = (S, I)>,
    {
        for (document_id, tokens) in documents {
            self.index_one(document_id.as_ref(), tokens, template);
        }
    }
}
