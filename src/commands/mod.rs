//! CLI commands for quill

pub mod dispatch;
pub mod ellipsize;
pub mod fuzzy;
pub mod helpers;
pub mod html_eq;
pub mod links;
pub mod query;
pub mod set;
pub mod title;
