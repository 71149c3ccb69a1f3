//! `quill html-eq` command

use serde_json::json;

use crate::cli::{Cli, HtmlEqArgs, OutputFormat};
use crate::commands::helpers::print_json;
use quill_core::error::Result;
use quill_core::html::is_html_equal;

/// Report semantic equality; differing fragments are not an error
pub fn execute(cli: &Cli, args: &HtmlEqArgs) -> Result<()> {
    let equal = is_html_equal(&args.a, &args.b);
    match cli.format {
        OutputFormat::Json => print_json(&json!({ "equal": equal })),
        OutputFormat::Human => {
            println!("{}", if equal { "equal" } else { "different" });
            Ok(())
        }
    }
}
