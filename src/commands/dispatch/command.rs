//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use quill_core::config::QuillConfig;
use quill_core::error::Result;

/// Load the explicit config file, or discover the global one
pub fn load_config(cli: &Cli) -> Result<QuillConfig> {
    match &cli.config {
        Some(path) => QuillConfig::load(path),
        None => QuillConfig::discover(),
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: QuillConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: QuillConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("quill {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Search query, note link and list-window tools for local note stores.");
        println!();
        println!("Run `quill --help` for usage information.");
        Ok(())
    }
}
