//! `quill query` command - transform search-box text into a full-text query

use serde_json::json;

use crate::cli::{Cli, OutputFormat, QueryArgs};
use crate::commands::helpers::print_json;
use quill_core::config::QuillConfig;
use quill_core::error::Result;
use quill_core::query::{
    parse_search, query_tokens, transform_query_with, SearchQuery, TransformOptions,
};

/// Execute the query command
pub fn execute(cli: &Cli, config: &QuillConfig, args: &QueryArgs) -> Result<()> {
    let options = TransformOptions {
        min_term_length: args
            .min_term_length
            .unwrap_or(config.search.min_term_length),
    };

    if args.fields {
        let search = parse_search(&args.text, &options);
        return match cli.format {
            OutputFormat::Json => print_json(&search),
            OutputFormat::Human => {
                print_search(&search);
                Ok(())
            }
        };
    }

    let expression = transform_query_with(&args.text, &options);
    match cli.format {
        OutputFormat::Json => print_json(&json!({
            "input": args.text,
            "query": expression,
            "tokens": query_tokens(&args.text),
        })),
        OutputFormat::Human => {
            println!("{expression}");
            Ok(())
        }
    }
}

fn print_search(search: &SearchQuery) {
    if let Some(title) = &search.title {
        println!("title: {title}");
    }
    if let Some(content) = &search.content {
        println!("content: {content}");
    }
    if !search.tags.is_empty() {
        println!("tags: {}", search.tags.join(", "));
    }
    if !search.colors.is_empty() {
        println!("colors: {}", search.colors.join(", "));
    }
    let dates = [
        ("edited_before", search.edited_before),
        ("edited_after", search.edited_after),
        ("created_before", search.created_before),
        ("created_after", search.created_after),
    ];
    for (name, value) in dates {
        if let Some(millis) = value {
            println!("{name}: {millis}");
        }
    }
    let flags = [
        ("pinned", search.pinned),
        ("locked", search.locked),
        ("readonly", search.readonly),
        ("local_only", search.local_only),
        ("favorite", search.favorite),
        ("archived", search.archived),
    ];
    for (name, value) in flags {
        if let Some(flag) = value {
            println!("{name}: {flag}");
        }
    }
    println!("filters: {}", search.filters);
}
