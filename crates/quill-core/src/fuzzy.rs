//! Fuzzy ranking of records by a named text field
//!
//! A record matches when every query character occurs in the field, in
//! query order and ignoring case, so `ems` matches `items` and `problems` but
//! not `system` (no `s` after its `em`). Records that do not match are dropped.
//! The skim score only orders the survivors, highest first; the sort is
//! stable, so records with equal scores keep their input order.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde_json::Value;

/// A record whose text fields can be looked up and replaced by name
pub trait FuzzyRecord: Clone {
    /// Text of the named field, if present
    fn field(&self, name: &str) -> Option<&str>;

    /// Replace the named field's text
    fn set_field(&mut self, name: &str, value: String);
}

impl FuzzyRecord for Value {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn set_field(&mut self, name: &str, value: String) {
        if let Some(object) = self.as_object_mut() {
            object.insert(name.to_string(), Value::String(value));
        }
    }
}

/// Decoration spliced around matched spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuzzyOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl FuzzyOptions {
    fn decorates(&self) -> bool {
        self.prefix.is_some() || self.suffix.is_some()
    }
}

/// Rank `items` against `query` by the text in `field`.
///
/// An empty (or whitespace-only) query returns the items unchanged.
pub fn fuzzy<T: FuzzyRecord>(
    query: &str,
    items: &[T],
    field: &str,
    opts: &FuzzyOptions,
) -> Vec<T> {
    let query = query.trim();
    if query.is_empty() {
        return items.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, T)> = items
        .iter()
        .filter_map(|item| {
            let text = item.field(field)?;
            let (score, indices) = matcher.fuzzy_indices(text, query)?;
            let mut item = item.clone();
            if opts.decorates() {
                let decorated = decorate(text, &indices, opts);
                item.set_field(field, decorated);
            }
            Some((score, item))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    tracing::trace!(query, matched = scored.len(), total = items.len(), "fuzzy");
    scored.into_iter().map(|(_, item)| item).collect()
}

/// Wrap every contiguous run of matched characters in prefix/suffix
fn decorate(text: &str, indices: &[usize], opts: &FuzzyOptions) -> String {
    let prefix = opts.prefix.as_deref().unwrap_or("");
    let suffix = opts.suffix.as_deref().unwrap_or("");
    let mut out = String::with_capacity(text.len() + indices.len() * 2);
    let mut matched = indices.iter().peekable();
    let mut in_run = false;

    for (i, ch) in text.chars().enumerate() {
        let hit = matched.peek() == Some(&&i);
        if hit {
            matched.next();
            if !in_run {
                out.push_str(prefix);
                in_run = true;
            }
        } else if in_run {
            out.push_str(suffix);
            in_run = false;
        }
        out.push(ch);
    }
    if in_run {
        out.push_str(suffix);
    }
    out
}
