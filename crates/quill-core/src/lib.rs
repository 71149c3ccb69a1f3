//! Quill Core Library
//!
//! The local read path of the quill notes app: a windowed item cache for
//! long lists, the search-box to full-text-query transformer, internal note
//! link scanning, fuzzy ranking, title templates, semantic HTML comparison
//! and small set helpers.

pub mod config;
pub mod content;
pub mod error;
pub mod fuzzy;
pub mod grouping;
pub mod html;
pub mod logging;
pub mod query;
pub mod set;
pub mod title;
