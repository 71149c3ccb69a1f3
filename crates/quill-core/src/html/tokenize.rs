//! Lenient HTML tokenizer
//!
//! Splits markup into open tags, close tags and text runs. Comments,
//! doctypes, CDATA and processing instructions are discarded. Anything that
//! does not look like a tag is kept as text.

use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

static TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();
static ATTR_RE: OnceLock<Option<Regex>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HtmlToken {
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close(String),
    Text(String),
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, "Failed to compile markup regex");
            None
        }
    }
}

fn tag_re() -> Option<&'static Regex> {
    TAG_RE
        .get_or_init(|| {
            compile(
                r#"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<![^>]*>|<\?[^>]*>|</\s*([a-zA-Z][a-zA-Z0-9:-]*)\s*>|<([a-zA-Z][a-zA-Z0-9:-]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)>"#,
            )
        })
        .as_ref()
}

fn attr_re() -> Option<&'static Regex> {
    ATTR_RE
        .get_or_init(|| {
            compile(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        })
        .as_ref()
}

pub(crate) fn tokenize(html: &str) -> Vec<HtmlToken> {
    let mut tokens = Vec::new();
    let Some(tag_re) = tag_re() else {
        tokens.push(HtmlToken::Text(decode_entities(html)));
        return tokens;
    };
    let mut last = 0;

    for caps in tag_re.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(HtmlToken::Text(decode_entities(&html[last..whole.start()])));
        }
        last = whole.end();

        if let Some(name) = caps.get(1) {
            tokens.push(HtmlToken::Close(name.as_str().to_ascii_lowercase()));
        } else if let Some(name) = caps.get(2) {
            let attrs = caps
                .get(3)
                .map(|m| parse_attrs(m.as_str()))
                .unwrap_or_default();
            tokens.push(HtmlToken::Open {
                name: name.as_str().to_ascii_lowercase(),
                attrs,
                self_closing: caps.get(4).is_some_and(|m| !m.as_str().is_empty()),
            });
        }
    }

    if last < html.len() {
        tokens.push(HtmlToken::Text(decode_entities(&html[last..])));
    }
    tokens
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    let Some(attr_re) = attr_re() else {
        return Vec::new();
    };
    attr_re
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

/// Decode the named entities that appear in editor output plus numeric refs
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_tags_and_text() {
        let tokens = tokenize("<P class=\"x\">hi</p>");
        assert_eq!(
            tokens,
            vec![
                HtmlToken::Open {
                    name: "p".to_string(),
                    attrs: vec![("class".to_string(), "x".to_string())],
                    self_closing: false,
                },
                HtmlToken::Text("hi".to_string()),
                HtmlToken::Close("p".to_string()),
            ]
        );
    }

    #[test]
    fn test_self_closing_with_single_quotes() {
        let tokens = tokenize("<img src='a.png'/>");
        assert_eq!(
            tokens,
            vec![HtmlToken::Open {
                name: "img".to_string(),
                attrs: vec![("src".to_string(), "a.png".to_string())],
                self_closing: true,
            }]
        );
    }

    #[test]
    fn test_comments_dropped_and_stray_angle_kept() {
        let tokens = tokenize("a<!-- hidden -->b < c");
        assert_eq!(
            tokens,
            vec![
                HtmlToken::Text("a".to_string()),
                HtmlToken::Text("b < c".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b &lt;3 &#65;&#x42;"), "a & b <3 AB");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
    }
}
