//! Internal links inside note content
//!
//! Content blocks embed links to other notes as
//! `[[nn://note/<id>[?params]|<display text>]]`. The display text is always
//! the last `|` segment; everything before it is the id, pipes included.

mod preview;
mod url;

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use preview::{ellipsize, highlight_slices, Side, TextSlice};
pub use url::{create_internal_link, parse_internal_link, LinkTarget, NOTE_LINK_PREFIX};

static MARKER_RE: OnceLock<Option<Regex>> = OnceLock::new();
static URL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, "Failed to compile internal link regex");
            None
        }
    }
}

fn marker_re() -> Option<&'static Regex> {
    MARKER_RE
        .get_or_init(|| compile(r"\[\[nn://note/(.*?)\]\]"))
        .as_ref()
}

/// A marker with a pipe-separated payload, or a bare note URL
fn url_re() -> Option<&'static Regex> {
    URL_RE
        .get_or_init(|| {
            compile(r#"\[\[(nn://note/.*?)\|([^|\]]*)\]\]|nn://note/[^\s"'<>\]]+"#)
        })
        .as_ref()
}

/// One addressable block of a note's rendered content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl ContentBlock {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            content: content.into(),
        }
    }
}

/// A link from content to another note, recomputed on every scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InternalLink {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub highlighted: bool,
}

pub(crate) struct Marker {
    /// Byte range of the whole `[[...]]`
    pub(crate) range: Range<usize>,
    pub(crate) link: InternalLink,
}

/// All well-formed markers in `content`, in order
pub(crate) fn markers(content: &str) -> Vec<Marker> {
    let Some(re) = marker_re() else {
        return Vec::new();
    };
    re.captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let link = parse_marker(caps.get(1)?.as_str())?;
            Some(Marker {
                range: whole.range(),
                link,
            })
        })
        .collect()
}

/// Ids are percent-decoded like [`parse_internal_link`] does; a marker whose
/// id is empty or does not decode is not a link.
fn parse_marker(payload: &str) -> Option<InternalLink> {
    let (target, text) = match payload.rsplit_once('|') {
        Some((target, text)) => (target, Some(text)),
        None => (payload, None),
    };
    let (raw_id, query) = target.split_once('?').unwrap_or((target, ""));
    let id = url::decode(raw_id)?;
    if id.trim().is_empty() {
        return None;
    }
    Some(InternalLink {
        text: text.map_or_else(|| id.clone(), str::to_string),
        id,
        params: url::parse_params(query),
        highlighted: false,
    })
}

/// Replace every marker with its display text
pub(crate) fn strip_markers(content: &str) -> String {
    let Some(re) = marker_re() else {
        return content.to_string();
    };
    re.replace_all(content, |caps: &Captures| {
        caps.get(1)
            .and_then(|payload| parse_marker(payload.as_str()))
            .map(|link| link.text)
            .unwrap_or_default()
    })
    .into_owned()
}

/// Every internal link in a block; markers with an empty id are skipped
pub fn extract_internal_links(block: &ContentBlock) -> Vec<InternalLink> {
    markers(&block.content)
        .into_iter()
        .map(|marker| marker.link)
        .collect()
}

/// Only the links in `block` that point at `note_id`, marked highlighted
pub fn highlight_internal_links(block: &ContentBlock, note_id: &str) -> Vec<InternalLink> {
    markers(&block.content)
        .into_iter()
        .filter(|marker| marker.link.id == note_id)
        .map(|marker| InternalLink {
            highlighted: true,
            ..marker.link
        })
        .collect()
}

/// Rewrite every internal note URL in `content` through `resolver`.
///
/// Marker display text is kept; only the URL part is replaced.
pub fn resolve_internal_links(
    content: &str,
    mut resolver: impl FnMut(&str) -> String,
) -> String {
    let Some(re) = url_re() else {
        return content.to_string();
    };
    re.replace_all(content, |caps: &Captures| match (caps.get(1), caps.get(2)) {
        (Some(url), Some(text)) => {
            format!("[[{}|{}]]", resolver(url.as_str()), text.as_str())
        }
        _ => resolver(&caps[0]),
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(content: &str) -> ContentBlock {
        ContentBlock::new("block", "paragraph", content)
    }

    #[test]
    fn test_extract_last_pipe_is_text() {
        let links = extract_internal_links(&block("[[nn://note/myid|ofmyid|actualtext]]"));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id, "myid|ofmyid");
        assert_eq!(links[0].text, "actualtext");
        assert!(!links[0].highlighted);
    }

    #[test]
    fn test_extract_multiple_and_skip_empty() {
        let links = extract_internal_links(&block(
            "a [[nn://note/one|First]] b [[nn://note/|Empty]] c [[nn://note/two|Second]]",
        ));
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["one", "two"]);
    }

    #[test]
    fn test_extract_without_text_uses_id() {
        let links = extract_internal_links(&block("[[nn://note/abc]]"));
        assert_eq!(links[0].id, "abc");
        assert_eq!(links[0].text, "abc");
    }

    #[test]
    fn test_extract_decodes_escaped_id() {
        let url = create_internal_link("a b", &BTreeMap::new());
        let links = extract_internal_links(&block(&format!("[[{url}|Spaced]] [[{url}]]")));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].id, "a b");
        assert_eq!(links[0].text, "Spaced");
        assert_eq!(links[1].text, "a b");
        assert_eq!(parse_internal_link(&url).map(|t| t.id), Some(links[0].id.clone()));
    }

    #[test]
    fn test_extract_skips_undecodable_id() {
        assert!(extract_internal_links(&block("[[nn://note/%FF|bad]]")).is_empty());
    }

    #[test]
    fn test_extract_params() {
        let links = extract_internal_links(&block("[[nn://note/abc?blockId=b7|See here]]"));
        assert_eq!(links[0].id, "abc");
        assert_eq!(links[0].params.get("blockId").map(String::as_str), Some("b7"));
        assert_eq!(links[0].text, "See here");
    }

    #[test]
    fn test_extract_ignores_other_markup() {
        assert!(extract_internal_links(&block("[[wiki]] [[https://x.y|z]] plain")).is_empty());
        assert!(extract_internal_links(&block("")).is_empty());
    }

    #[test]
    fn test_highlight_filters_to_note() {
        let links = highlight_internal_links(
            &block("[[nn://note/a|A]] [[nn://note/b|B]] [[nn://note/a|again]]"),
            "a",
        );
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.id == "a" && l.highlighted));
        assert_eq!(links[1].text, "again");
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(
            strip_markers("go to [[nn://note/x|X]] now [[nn://note/|nothing]]"),
            "go to X now "
        );
    }

    #[test]
    fn test_resolve_internal_links() {
        let content = r#"<a href="nn://note/abc">x</a> [[nn://note/p|q|Text]] https://e.com"#;
        let resolved = resolve_internal_links(content, |url| match parse_internal_link(url) {
            Some(target) => format!("{}.md", target.id),
            None => url.to_string(),
        });
        assert_eq!(
            resolved,
            r#"<a href="abc.md">x</a> [[p|q.md|Text]] https://e.com"#
        );
    }

    #[test]
    fn test_serialize_link_omits_defaults() {
        let link = InternalLink {
            id: "a".into(),
            text: "A".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            serde_json::json!({"id": "a", "text": "A"})
        );
    }
}
