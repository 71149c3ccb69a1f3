//! Subcommand argument structures

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, ValueEnum};

use crate::cli::parse::{parse_instant, parse_side, parse_time_format};
use quill_core::content::Side;
use quill_core::title::TimeFormat;

/// Arguments for the query command.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Raw search text
    #[arg(allow_hyphen_values = true)]
    pub text: String,

    /// Parse field prefixes (title:, tag:, pinned:, ...) into a structured query
    #[arg(long)]
    pub fields: bool,

    /// Drop bare terms shorter than this (overrides config)
    #[arg(long)]
    pub min_term_length: Option<usize>,
}

/// Arguments for the links command.
#[derive(Args, Debug)]
pub struct LinksArgs {
    /// Content file, or `-` for stdin. A JSON array of blocks is read as
    /// blocks; anything else is one block.
    pub input: PathBuf,

    /// Only links to this note, with highlighted previews
    #[arg(long)]
    pub note: Option<String>,

    /// Preview context in characters (overrides config)
    #[arg(long)]
    pub context: Option<usize>,
}

/// Arguments for the ellipsize command.
#[derive(Args, Debug)]
pub struct EllipsizeArgs {
    #[arg(allow_hyphen_values = true)]
    pub text: String,

    /// Characters to keep
    #[arg(long)]
    pub max: usize,

    /// Which end to cut (start, end)
    #[arg(long, value_parser = parse_side, default_value = "end")]
    pub side: Side,
}

/// Arguments for the title command.
#[derive(Args, Debug)]
pub struct TitleArgs {
    /// Template with $date$, $time$, $timestamp$, $headline$, $count$
    #[arg(long)]
    pub template: Option<String>,

    /// Date pattern, e.g. DD-MM-YYYY
    #[arg(long)]
    pub date_format: Option<String>,

    /// 12-hour or 24-hour
    #[arg(long, value_parser = parse_time_format)]
    pub time_format: Option<TimeFormat>,

    #[arg(long, default_value = "")]
    pub headline: String,

    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Instant to format (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<NaiveDateTime>,
}

/// Arguments for the html-eq command.
#[derive(Args, Debug)]
pub struct HtmlEqArgs {
    pub a: String,
    pub b: String,
}

/// Arguments for the fuzzy command.
#[derive(Args, Debug)]
pub struct FuzzyArgs {
    pub query: String,

    /// Record field to match against
    #[arg(long, default_value = "title")]
    pub field: String,

    /// JSON array file, or `-` for stdin (default)
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SetOperation {
    Union,
    Intersection,
    Difference,
    Complement,
    Equals,
}

/// Arguments for the set command.
#[derive(Args, Debug)]
pub struct SetArgs {
    #[arg(value_enum)]
    pub operation: SetOperation,

    /// Comma-separated list
    pub a: String,

    /// Comma-separated list
    pub b: String,
}
