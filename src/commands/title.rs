//! `quill title` command - expand a title template
//!
//! Flags override the `[title]` config section; the instant defaults to the
//! local wall clock.

use chrono::Local;
use serde_json::json;

use crate::cli::{Cli, OutputFormat, TitleArgs};
use crate::commands::helpers::print_json;
use quill_core::config::QuillConfig;
use quill_core::error::Result;
use quill_core::title::format_title;

pub fn execute(cli: &Cli, config: &QuillConfig, args: &TitleArgs) -> Result<()> {
    let template = args.template.as_deref().unwrap_or(&config.title.template);
    let date_format = args
        .date_format
        .as_deref()
        .unwrap_or(&config.title.date_format);
    let time_format = args.time_format.unwrap_or(config.title.time_format);
    let now = args.at.unwrap_or_else(|| Local::now().naive_local());

    let title = format_title(
        template,
        date_format,
        time_format,
        &args.headline,
        args.count,
        now,
    );

    match cli.format {
        OutputFormat::Json => print_json(&json!({ "title": title, "template": template })),
        OutputFormat::Human => {
            println!("{title}");
            Ok(())
        }
    }
}
