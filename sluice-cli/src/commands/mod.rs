//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod plan;
mod run;

pub use plan::PlanArgs;
pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Parse files across all endpoints
    Run(RunArgs),
    /// Show how workers would be allocated, without sending anything
    Plan(PlanArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run(args) => run::handle_run(args, config).await,
        Commands::Plan(args) => plan::handle_plan(args, config),
    }
}
