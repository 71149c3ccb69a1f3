//! CLI argument parsing for quill
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json, --config

pub mod args;
pub mod output;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use args::{
    EllipsizeArgs, FuzzyArgs, HtmlEqArgs, LinksArgs, QueryArgs, SetArgs, SetOperation, TitleArgs,
};
pub use output::OutputFormat;

/// Quill - read-path toolkit for local-first note stores
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. `debug` or `quill_core=trace`)
    #[arg(long, global = true, env = "QUILL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file (defaults to the global quill config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Turn search-box text into a full-text query
    Query(QueryArgs),

    /// List internal note links in content
    Links(LinksArgs),

    /// Shorten text with an ellipsis
    Ellipsize(EllipsizeArgs),

    /// Expand a note title template
    Title(TitleArgs),

    /// Compare two HTML fragments semantically
    HtmlEq(HtmlEqArgs),

    /// Fuzzy-rank a JSON array of records
    Fuzzy(FuzzyArgs),

    /// Set operations on comma-separated lists
    Set(SetArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["quill", "query", "hello", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Query(_))));
    }

    #[test]
    fn test_set_operation_parsed() {
        let cli = Cli::try_parse_from(["quill", "set", "union", "1,2", "2,3"]).unwrap();
        match cli.command {
            Some(Commands::Set(args)) => assert_eq!(args.operation, SetOperation::Union),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
