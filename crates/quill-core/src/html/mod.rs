//! Semantic HTML comparison
//!
//! Two fragments are equal when they render the same content: attributes are
//! ignored except `src` on media elements and `href` on anchors, whitespace
//! runs collapse, whitespace-only text and empty elements vanish, `<br>` acts
//! as a separator, and `<x/>` equals `<x></x>`.

mod tokenize;

use serde_json::Value;

use self::tokenize::{tokenize, HtmlToken};

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const MEDIA_ELEMENTS: [&str; 6] = ["img", "video", "audio", "iframe", "source", "embed"];

/// Normalized markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element {
        name: String,
        /// `src`/`href` when the element carries one that matters
        target: Option<String>,
        children: Vec<HtmlNode>,
    },
    Text(String),
}

/// Compare two HTML fragments for semantic equality
pub fn is_html_equal(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Compare two loosely-typed values; anything that is not a string is unequal
pub fn is_html_value_equal(a: &Value, b: &Value) -> bool {
    match (a.as_str(), b.as_str()) {
        (Some(a), Some(b)) => is_html_equal(a, b),
        _ => false,
    }
}

/// Parse and normalize a fragment into its comparable form
pub fn normalize(html: &str) -> Vec<HtmlNode> {
    struct Frame {
        name: String,
        target: Option<String>,
        children: Vec<HtmlNode>,
    }

    let mut root: Vec<HtmlNode> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    fn close(frame: Frame, stack: &mut [Frame], root: &mut Vec<HtmlNode>) {
        let node = element(frame.name, frame.target, frame.children);
        let parent = match stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => root,
        };
        push_node(parent, node);
    }

    for token in tokenize(html) {
        match token {
            HtmlToken::Text(text) => {
                let parent = match stack.last_mut() {
                    Some(frame) => &mut frame.children,
                    None => &mut root,
                };
                push_node(parent, Some(HtmlNode::Text(text)));
            }
            HtmlToken::Open {
                name,
                attrs,
                self_closing,
            } => {
                let target = kept_target(&name, &attrs);
                if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                    let parent = match stack.last_mut() {
                        Some(frame) => &mut frame.children,
                        None => &mut root,
                    };
                    push_node(parent, element(name, target, Vec::new()));
                } else {
                    stack.push(Frame {
                        name,
                        target,
                        children: Vec::new(),
                    });
                }
            }
            HtmlToken::Close(name) => {
                // Unmatched close tags are ignored; matched ones close everything above
                if let Some(pos) = stack.iter().rposition(|frame| frame.name == name) {
                    while stack.len() > pos {
                        if let Some(frame) = stack.pop() {
                            close(frame, &mut stack, &mut root);
                        }
                    }
                }
            }
        }
    }

    while let Some(frame) = stack.pop() {
        close(frame, &mut stack, &mut root);
    }

    finish(root)
}

fn kept_target(name: &str, attrs: &[(String, String)]) -> Option<String> {
    let wanted = if name == "a" {
        "href"
    } else if MEDIA_ELEMENTS.contains(&name) {
        "src"
    } else {
        return None;
    };
    attrs
        .iter()
        .find(|(key, _)| key == wanted)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Build an element, or nothing when it carries no content
fn element(name: String, target: Option<String>, children: Vec<HtmlNode>) -> Option<HtmlNode> {
    if name == "br" {
        return Some(HtmlNode::Text(" ".to_string()));
    }
    let children = finish(children);
    if children.is_empty() && target.is_none() {
        return None;
    }
    Some(HtmlNode::Element {
        name,
        target,
        children,
    })
}

/// Append a node, merging adjacent text runs
fn push_node(parent: &mut Vec<HtmlNode>, node: Option<HtmlNode>) {
    let Some(node) = node else {
        return;
    };
    if let HtmlNode::Text(text) = &node {
        if let Some(HtmlNode::Text(previous)) = parent.last_mut() {
            previous.push(' ');
            previous.push_str(text);
            return;
        }
    }
    parent.push(node);
}

/// Collapse whitespace in text children and drop the ones left empty
fn finish(children: Vec<HtmlNode>) -> Vec<HtmlNode> {
    children
        .into_iter()
        .filter_map(|child| match child {
            HtmlNode::Text(text) => {
                let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
                (!collapsed.is_empty()).then_some(HtmlNode::Text(collapsed))
            }
            element => Some(element),
        })
        .collect()
}
