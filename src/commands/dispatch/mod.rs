//! Command dispatch logic for quill

use std::time::Instant;

use crate::cli::Cli;
use quill_core::error::Result;
use quill_core::trace_time;
use tracing::debug;

mod command;
mod commands;

use command::{load_config, Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = load_config(cli)?;

    debug!(elapsed = ?start.elapsed(), "load_config");

    let ctx = CommandContext::new(cli, config, start);

    let result = match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    };

    trace_time!(ctx.start, "execute_command");
    result
}
