//! Search query transformation
//!
//! Turns what a user types into a search box into a full-text-search
//! expression: bare words are joined with `AND`, `OR`/`NOT` are kept when
//! they sit between two operands, parentheses group, quoted phrases stay
//! atomic, and anything the engine would misread is quoted.
//!
//! Transformation never fails. Malformed input degrades to the best
//! expression that can be built from it, possibly the empty string.

mod fields;
mod parse;
mod tokenize;


use serde::Serialize;

pub use fields::{parse_search, SearchQuery, SUPPORTED_FIELDS};

use self::tokenize::Token;

/// Knobs for [`transform_query_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Bare words shorter than this (ignoring a trailing `*`) are dropped
    pub min_term_length: usize,
}

/// Transform a raw query with default options
pub fn transform_query(input: &str) -> String {
    transform_query_with(input, &TransformOptions::default())
}

/// Transform a raw query
pub fn transform_query_with(input: &str, options: &TransformOptions) -> String {
    let tokens = tokenize::tokenize(input, |_| false);
    let output = parse::emit(&parse::parse(&tokens), options);
    tracing::trace!(input, output = %output, "transform_query");
    output
}

/// Words of a query sorted by the role their operator gives them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryTokens {
    pub and_tokens: Vec<String>,
    pub or_tokens: Vec<String>,
    pub not_tokens: Vec<String>,
}

/// Split a query into required, alternative and excluded words for
/// highlighting. `OR`/`NOT` apply to the run of words after them, up to
/// the next operator or parenthesis. Each word is reported once.
pub fn query_tokens(input: &str) -> QueryTokens {
    let mut result = QueryTokens::default();
    let mut is_or = false;
    let mut is_not = false;

    for token in tokenize::tokenize(input, |_| false) {
        match token {
            Token::Word(text) | Token::Phrase(text) => {
                let seen = result.and_tokens.contains(&text)
                    || result.or_tokens.contains(&text)
                    || result.not_tokens.contains(&text);
                if seen || text.is_empty() {
                    continue;
                }
                if is_not {
                    result.not_tokens.push(text);
                } else if is_or {
                    result.or_tokens.push(text);
                } else {
                    result.and_tokens.push(text);
                }
            }
            Token::Or => {
                is_or = true;
                is_not = false;
            }
            Token::Not => {
                is_not = true;
                is_or = false;
            }
            Token::And | Token::Open | Token::Close | Token::Field(_) => {
                is_or = false;
                is_not = false;
            }
        }
    }

    result
}
