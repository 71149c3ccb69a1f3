//! Truncated previews around internal links

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{markers, strip_markers, ContentBlock};
use crate::error::QuillError;

const ELLIPSIS: &str = "...";

/// Which end of the text [`ellipsize`] cuts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Keep the tail
    Start,
    /// Keep the head
    #[default]
    End,
}

impl FromStr for Side {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Side::Start),
            "end" => Ok(Side::End),
            other => Err(QuillError::unsupported("side", other, "start, end")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Start => write!(f, "start"),
            Side::End => write!(f, "end"),
        }
    }
}

/// Shorten `text` to `max_length` characters plus an ellipsis on `side`.
///
/// Text that already fits is returned unchanged.
pub fn ellipsize(text: &str, max_length: usize, side: Side) -> String {
    let length = text.chars().count();
    if length <= max_length {
        return text.to_string();
    }
    match side {
        Side::End => {
            let head: String = text.chars().take(max_length).collect();
            format!("{head}{ELLIPSIS}")
        }
        Side::Start => {
            let tail: String = text.chars().skip(length - max_length).collect();
            format!("{ELLIPSIS}{tail}")
        }
    }
}

/// A run of preview text, highlighted when it is the link itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSlice {
    pub text: String,
    pub highlighted: bool,
}

impl TextSlice {
    fn plain(text: String) -> Self {
        Self {
            text,
            highlighted: false,
        }
    }
}

/// For every link to `note_id` in `block`, the text before it, the link
/// text, and the text after it.
///
/// Surrounding text has marker syntax replaced by display text and is cut to
/// `context` characters on the side away from the link.
pub fn highlight_slices(
    block: &ContentBlock,
    note_id: &str,
    context: usize,
) -> Vec<[TextSlice; 3]> {
    let content = block.content.as_str();
    markers(content)
        .into_iter()
        .filter(|marker| marker.link.id == note_id)
        .map(|marker| {
            let before = strip_markers(&content[..marker.range.start]);
            let after = strip_markers(&content[marker.range.end..]);
            [
                TextSlice::plain(ellipsize(&before, context, Side::Start)),
                TextSlice {
                    text: marker.link.text,
                    highlighted: true,
                },
                TextSlice::plain(ellipsize(&after, context, Side::End)),
            ]
        })
        .collect()
}
