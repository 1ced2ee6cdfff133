//! CLI module for the gateway
//!
//! Provides the command-line interface:
//! - serve: boot the gateway and enter the serving loop
//! - check: one-shot query classification

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, run_command, serve};
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}
