//! CLI argument definitions using clap
//!
//! Commands:
//! - graph-gateway serve --config <path>
//! - graph-gateway check <query>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// graph-gateway - HTTP gateway for a Neo4j-compatible graph database
#[derive(Parser, Debug)]
#[command(name = "graph-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the gateway server
    Serve {
        /// Path to configuration file; defaults apply when absent
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Classify a query against the keyword policy and exit
    Check {
        /// Query text to classify
        query: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
