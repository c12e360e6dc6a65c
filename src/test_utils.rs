//! Shared test helpers.
//!
//! Provides a minimal word tokenizer standing in for the external tokenizer:
//! words are runs of alphanumeric chars, lowercased, with zero-based line and
//! char coordinates (end char exclusive). In template mode `{{...}}` runs are
//! removed and the next token is flagged as following a wildcard.

use crate::index::Index;
use crate::token::Token;

/// Tokenize text lines into a stream with contiguous offsets
pub fn tokenize_lines(lines: &[&str], template: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pending_wildcard = false;

    for (line_no, line) in lines.iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if template && chars[i] == '{' && chars.get(i + 1) == Some(&'{') {
                let mut j = i + 2;
                while j + 1 < chars.len() && !(chars[j] == '}' && chars[j + 1] == '}') {
                    j += 1;
                }
                i = (j + 2).min(chars.len());
                pending_wildcard = true;
                continue;
            }

            if chars[i].is_alphanumeric() {
                let start = i;
                while i < chars.len() && chars[i].is_alphanumeric() {
                    i += 1;
                }
                let value = chars[start..i].iter().collect::<String>().to_lowercase();
                let mut token = Token::new(value, tokens.len(), line_no, start, line_no, i);
                token.after_wildcard = std::mem::take(&mut pending_wildcard);
                tokens.push(token);
            } else {
                i += 1;
            }
        }
    }

    tokens
}

/// Build an index from `(document id, lines)` pairs
pub fn create_test_index(ngram_len: usize, docs: &[(&str, &[&str])], template: bool) -> Index {
    let mut index = Index::new(ngram_len).unwrap();
    for (doc_id, lines) in docs {
        index.index_one(doc_id, tokenize_lines(lines, template), template);
    }
    index
}

/// A BSD-style license split over several lines, with a copyright header
pub const BSD_NEW: &[&str] = &[
    "Copyright (c) <year>, <owner>",
    "All rights reserved.",
    "",
    "Redistribution and use in source and binary forms, with or without",
    "modification, are permitted provided that the following conditions are met:",
    "Redistributions of source code must retain the above copyright notice,",
    "this list of conditions and the following disclaimer.",
];

/// Same text with the copyright holder turned into wildcards
pub const BSD_NEW_TEMPLATE: &[&str] = &[
    "Copyright (c) {{year}}, {{owner}}",
    "All rights reserved.",
    "",
    "Redistribution and use in source and binary forms, with or without",
    "modification, are permitted provided that the following conditions are met:",
    "Redistributions of source code must retain the above copyright notice,",
    "this list of conditions and the following disclaimer.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_coordinates() {
        let tokens = tokenize_lines(&["Hi my name is joker,", "yes."], false);
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["hi", "my", "name", "is", "joker", "yes"]);

        assert_eq!(tokens[2], Token::new("name", 2, 0, 6, 0, 10));
        assert_eq!(tokens[5], Token::new("yes", 5, 1, 0, 1, 3));
    }

    #[test]
    fn test_tokenize_template_marks_wildcards() {
        let tokens = tokenize_lines(&["name is joker, {{}} name is joker"], true);
        assert_eq!(tokens.len(), 6);
        assert!(tokens[3].after_wildcard);
        assert_eq!(tokens[3].start_char, 20);
        assert_eq!(tokens[5].end_char, 33);
        assert_eq!(tokens.iter().filter(|t| t.after_wildcard).count(), 1);
    }

    #[test]
    fn test_tokenize_without_template_keeps_braced_words() {
        let tokens = tokenize_lines(&["{{year}} owner"], false);
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["year", "owner"]);
        assert!(tokens.iter().all(|t| !t.after_wildcard));
    }

    #[test]
    fn test_bsd_fixtures_token_counts() {
        assert_eq!(tokenize_lines(BSD_NEW, false).len(), 46);
        assert_eq!(tokenize_lines(BSD_NEW_TEMPLATE, true).len(), 44);
    }
}
