//! `nn://note/<id>[?key=value&...]` URLs

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

/// Scheme and host every internal note link starts with
pub const NOTE_LINK_PREFIX: &str = "nn://note/";

/// The note (and optional parameters, e.g. `blockId`) an internal link points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
    pub id: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

/// Parse an internal note URL.
///
/// Returns `None` for any other scheme or host, for an empty id, and for
/// escapes that do not decode to UTF-8.
pub fn parse_internal_link(url: &str) -> Option<LinkTarget> {
    let rest = url.trim().strip_prefix(NOTE_LINK_PREFIX)?;
    let (raw_id, query) = rest.split_once('?').unwrap_or((rest, ""));
    let id = decode(raw_id)?;
    if id.trim().is_empty() {
        return None;
    }
    Some(LinkTarget {
        id,
        params: parse_params(query),
    })
}

/// Build an internal note URL, escaping the id and every parameter
pub fn create_internal_link(id: &str, params: &BTreeMap<String, String>) -> String {
    let mut url = format!("{NOTE_LINK_PREFIX}{}", urlencoding::encode(id));
    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

/// Flat `key=value&...` map; pairs with an empty or undecodable key are dropped
pub(crate) fn parse_params(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(key).filter(|k| !k.is_empty())?;
            Some((key, decode(value)?))
        })
        .collect()
}

pub(crate) fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(Cow::into_owned)
}
