//! Field-scoped search (`title:`, `tag:`, `pinned:`, ...)
//!
//! A field prefix scopes every following token until the next prefix.
//! Tokens before the first prefix form the unscoped query, which doubles as
//! the title and content query when those fields are not given explicitly.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use super::parse::{emit, parse};
use super::tokenize::{tokenize, Token};
use super::TransformOptions;

/// Field names recognized before a `:`
pub const SUPPORTED_FIELDS: [&str; 14] = [
    "title",
    "content",
    "tag",
    "color",
    "edited_before",
    "edited_after",
    "created_before",
    "created_after",
    "pinned",
    "locked",
    "readonly",
    "local_only",
    "favorite",
    "archived",
];

/// A parsed search box
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// FTS expression for titles
    pub title: Option<String>,
    /// FTS expression for note content
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub colors: Vec<String>,
    /// Bounds in unix milliseconds
    pub edited_before: Option<i64>,
    pub edited_after: Option<i64>,
    pub created_before: Option<i64>,
    pub created_after: Option<i64>,
    pub pinned: Option<bool>,
    pub locked: Option<bool>,
    pub readonly: Option<bool>,
    pub local_only: Option<bool>,
    pub favorite: Option<bool>,
    pub archived: Option<bool>,
    /// Number of non-text filters that were set
    pub filters: usize,
}

struct FieldGroup {
    field: Option<String>,
    tokens: Vec<Token>,
}

impl FieldGroup {
    fn expression(&self, options: &TransformOptions) -> Option<String> {
        let expression = emit(&parse(&self.tokens), options);
        (!expression.is_empty()).then_some(expression)
    }

    fn raw_text(&self) -> Option<String> {
        let words: Vec<&str> = self
            .tokens
            .iter()
            .filter_map(|token| match token {
                Token::Word(text) | Token::Phrase(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let text = words.join(" ");
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Parse a search box into per-field expressions and filters
pub fn parse_search(input: &str, options: &TransformOptions) -> SearchQuery {
    let mut groups = vec![FieldGroup {
        field: None,
        tokens: Vec::new(),
    }];
    for token in tokenize(input, |field| SUPPORTED_FIELDS.contains(&field)) {
        match token {
            Token::Field(field) => groups.push(FieldGroup {
                field: Some(field),
                tokens: Vec::new(),
            }),
            token => {
                if let Some(group) = groups.last_mut() {
                    group.tokens.push(token);
                }
            }
        }
    }

    let first = |name: &str| groups.iter().find(|g| g.field.as_deref() == Some(name));
    let all_text = |name: &str| -> Vec<String> {
        groups
            .iter()
            .filter(|g| g.field.as_deref() == Some(name))
            .filter_map(FieldGroup::raw_text)
            .collect()
    };
    let date = |name: &str| {
        first(name)
            .and_then(FieldGroup::raw_text)
            .and_then(|t| parse_date(&t))
    };
    let flag = |name: &str| {
        first(name)
            .and_then(FieldGroup::raw_text)
            .and_then(|t| match t.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            })
    };

    let unscoped = groups[0].expression(options);
    let mut query = SearchQuery {
        title: first("title")
            .and_then(|g| g.expression(options))
            .or_else(|| unscoped.clone()),
        content: first("content")
            .and_then(|g| g.expression(options))
            .or(unscoped),
        tags: all_text("tag"),
        colors: all_text("color"),
        edited_before: date("edited_before"),
        edited_after: date("edited_after"),
        created_before: date("created_before"),
        created_after: date("created_after"),
        pinned: flag("pinned"),
        locked: flag("locked"),
        readonly: flag("readonly"),
        local_only: flag("local_only"),
        favorite: flag("favorite"),
        archived: flag("archived"),
        filters: 0,
    };
    query.filters = count_filters(&query);
    query
}

fn count_filters(query: &SearchQuery) -> usize {
    let lists = [!query.tags.is_empty(), !query.colors.is_empty()];
    let dates = [
        query.edited_before,
        query.edited_after,
        query.created_before,
        query.created_after,
    ];
    let flags = [
        query.pinned,
        query.locked,
        query.readonly,
        query.local_only,
        query.favorite,
        query.archived,
    ];
    lists.iter().filter(|set| **set).count()
        + dates.iter().filter(|d| d.is_some()).count()
        + flags.iter().filter(|f| f.is_some()).count()
}

/// `YYYY-MM-DD` (midnight UTC) or RFC 3339, as unix milliseconds
fn parse_date(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
