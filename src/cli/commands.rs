//! CLI command implementations

use std::path::Path;

use crate::config::GatewayConfig;
use crate::governor::{KeywordGovernor, QueryGovernor, Verdict};
use crate::http_server::GatewayServer;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Dispatch the parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Serve { config } => serve(config.as_deref()),
        Command::Check { query } => check(&query),
    }
}

/// Boot the gateway and serve until shutdown.
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    let config = match config_path {
        Some(path) => GatewayConfig::load(path).map_err(CliError::Config)?,
        None => GatewayConfig::default(),
    };

    let server = GatewayServer::new(config).map_err(|e| CliError::Server(e.to_string()))?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Server(e.to_string()))?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::Server(e.to_string()))
}

/// One-shot governor classification. Prints the verdict; a rejection is a
/// non-zero exit so the command composes in scripts.
pub fn check(query: &str) -> CliResult<()> {
    match KeywordGovernor::new().classify(query) {
        Verdict::Allowed => {
            println!("ALLOWED");
            Ok(())
        }
        Verdict::Rejected => {
            println!("REJECTED");
            Err(CliError::QueryRejected)
        }
    }
}
