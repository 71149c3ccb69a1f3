//! Command implementations for all quill commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{ellipsize, fuzzy, html_eq, links, query, set, title};
use quill_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let cli = ctx.cli;
        let config = &ctx.config;
        match self {
            Commands::Query(args) => query::execute(cli, config, args),
            Commands::Links(args) => links::execute(cli, config, args),
            Commands::Ellipsize(args) => ellipsize::execute(cli, args),
            Commands::Title(args) => title::execute(cli, config, args),
            Commands::HtmlEq(args) => html_eq::execute(cli, args),
            Commands::Fuzzy(args) => fuzzy::execute(cli, config, args),
            Commands::Set(args) => set::execute(cli, args),
        }
    }
}
