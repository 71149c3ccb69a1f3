//! `quill set` command - set algebra on comma-separated lists

use serde_json::json;

use crate::cli::parse::split_list;
use crate::cli::{Cli, OutputFormat, SetArgs, SetOperation};
use crate::commands::helpers::print_json;
use quill_core::error::Result;
use quill_core::set;

pub fn execute(cli: &Cli, args: &SetArgs) -> Result<()> {
    let a = split_list(&args.a);
    let b = split_list(&args.b);

    let result = match args.operation {
        SetOperation::Union => set::union(&a, &b),
        SetOperation::Intersection => set::intersection(&a, &b),
        SetOperation::Difference => set::difference(&a, &b),
        SetOperation::Complement => set::complement(&a, &b),
        SetOperation::Equals => {
            let equal = set::equals(&a, &b);
            return match cli.format {
                OutputFormat::Json => print_json(&json!({ "equal": equal })),
                OutputFormat::Human => {
                    println!("{equal}");
                    Ok(())
                }
            };
        }
    };

    match cli.format {
        OutputFormat::Json => print_json(&json!({ "result": result })),
        OutputFormat::Human => {
            println!("{}", result.join(","));
            Ok(())
        }
    }
}
