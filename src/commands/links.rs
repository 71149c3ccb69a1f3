//! `quill links` command - list internal note links in content

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, LinksArgs, OutputFormat};
use crate::commands::helpers::{print_json, read_input};
use quill_core::config::QuillConfig;
use quill_core::content::{
    extract_internal_links, highlight_internal_links, highlight_slices, ContentBlock,
    InternalLink, TextSlice,
};
use quill_core::bail_usage;
use quill_core::error::Result;

#[derive(Debug, Serialize)]
struct BlockLinks {
    block: String,
    links: Vec<InternalLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    previews: Vec<[TextSlice; 3]>,
}

/// Execute the links command
pub fn execute(cli: &Cli, config: &QuillConfig, args: &LinksArgs) -> Result<()> {
    if args.context.is_some() && args.note.is_none() {
        bail_usage!("--context requires --note");
    }

    let content = read_input(&args.input)?;
    let blocks = load_blocks(&args.input, content);
    let context = args.context.unwrap_or(config.links.preview_length);

    let results: Vec<BlockLinks> = blocks
        .iter()
        .map(|block| match &args.note {
            Some(note_id) => BlockLinks {
                block: block.id.clone(),
                links: highlight_internal_links(block, note_id),
                previews: highlight_slices(block, note_id, context),
            },
            None => BlockLinks {
                block: block.id.clone(),
                links: extract_internal_links(block),
                previews: Vec::new(),
            },
        })
        .filter(|result| !result.links.is_empty())
        .collect();

    debug!(
        blocks = blocks.len(),
        with_links = results.len(),
        "scanned content blocks"
    );

    match cli.format {
        OutputFormat::Json => print_json(&results),
        OutputFormat::Human => {
            for result in &results {
                if result.previews.is_empty() {
                    for link in &result.links {
                        println!("{}\t{}\t{}", result.block, link.id, link.text);
                    }
                }
                for [before, link, after] in &result.previews {
                    println!("{}: {}[{}]{}", result.block, before.text, link.text, after.text);
                }
            }
            if results.is_empty() && !cli.quiet {
                eprintln!("No internal links found");
            }
            Ok(())
        }
    }
}

/// A JSON array of blocks is used as-is; anything else becomes one text block
fn load_blocks(input: &Path, content: String) -> Vec<ContentBlock> {
    if let Ok(blocks) = serde_json::from_str::<Vec<ContentBlock>>(&content) {
        return blocks;
    }
    let id = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| stem != "-")
        .unwrap_or_else(|| "stdin".to_string());
    vec![ContentBlock::new(id, "text", content)]
}
