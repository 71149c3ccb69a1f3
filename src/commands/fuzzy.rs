//! `quill fuzzy` command - rank a JSON array of records

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, FuzzyArgs, OutputFormat};
use crate::commands::helpers::{non_empty, print_json, read_input};
use quill_core::config::QuillConfig;
use quill_core::bail_invalid;
use quill_core::error::Result;
use quill_core::fuzzy::{fuzzy, FuzzyOptions, FuzzyRecord};

pub fn execute(cli: &Cli, config: &QuillConfig, args: &FuzzyArgs) -> Result<()> {
    let input = args.input.as_deref().unwrap_or(Path::new("-"));
    let items: Vec<Value> = match serde_json::from_str::<Value>(&read_input(input)?)? {
        Value::Array(items) => items,
        other => bail_invalid!("fuzzy input (expected a JSON array)", type_name(&other)),
    };

    let options = FuzzyOptions {
        prefix: non_empty(&config.search.match_prefix),
        suffix: non_empty(&config.search.match_suffix),
    };
    let ranked = fuzzy(&args.query, &items, &args.field, &options);
    debug!(
        candidates = items.len(),
        matched = ranked.len(),
        "fuzzy ranking"
    );

    match cli.format {
        OutputFormat::Json => print_json(&ranked),
        OutputFormat::Human => {
            for item in &ranked {
                println!("{}", item.field(&args.field).unwrap_or_default());
            }
            Ok(())
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
