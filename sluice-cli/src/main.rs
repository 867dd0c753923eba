//! Sluice CLI
//!
//! Command-line interface for distributing document parsing across a pool
//! of remote endpoints.

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use sluice_scheduler::config::{DEFAULT_ENDPOINT, DEFAULT_WORKERS_PER_ENDPOINT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sluice")]
#[command(about = "Distribute document parsing across GPU endpoints", long_about = None)]
struct Cli {
    /// Parse endpoint URL (repeat or comma-separate for several)
    #[arg(
        short,
        long = "endpoint",
        env = "SLUICE_ENDPOINTS",
        value_delimiter = ',',
        default_value = DEFAULT_ENDPOINT,
        global = true
    )]
    endpoints: Vec<String>,

    /// Maximum concurrent jobs per endpoint
    #[arg(
        short,
        long,
        env = "SLUICE_WORKERS_PER_ENDPOINT",
        default_value_t = DEFAULT_WORKERS_PER_ENDPOINT,
        global = true
    )]
    workers_per_endpoint: usize,

    /// Also write logs to a timestamped file in this directory
    #[arg(long, env = "SLUICE_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = logging::init(cli.log_dir.as_deref())? {
        tracing::info!("Writing logs to {}", path.display());
    }

    let config = Config {
        endpoints: cli.endpoints,
        workers_per_endpoint: cli.workers_per_endpoint,
    };

    handle_command(cli.command, &config).await
}
