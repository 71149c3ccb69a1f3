//! `quill ellipsize` command

use serde_json::json;

use crate::cli::{Cli, EllipsizeArgs, OutputFormat};
use crate::commands::helpers::print_json;
use quill_core::content::ellipsize;
use quill_core::error::Result;

pub fn execute(cli: &Cli, args: &EllipsizeArgs) -> Result<()> {
    let text = ellipsize(&args.text, args.max, args.side);
    match cli.format {
        OutputFormat::Json => print_json(&json!({ "text": text, "side": args.side })),
        OutputFormat::Human => {
            println!("{text}");
            Ok(())
        }
    }
}
