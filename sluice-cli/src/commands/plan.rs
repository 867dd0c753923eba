//! Plan command handler
//!
//! Prints the allocation a run would use.

use anyhow::Result;
use clap::Args;
use colored::*;
use sluice_core::{Allocation, ConfigError};
use sluice_core::domain::job::Parameters;
use sluice_scheduler::FileJobSource;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Args)]
pub struct PlanArgs {
    /// Files or directories to parse
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

pub fn handle_plan(args: PlanArgs, config: &Config) -> Result<()> {
    let pool_config = config.pool_config(Parameters::new());
    pool_config.validate()?;

    let endpoints = pool_config.endpoint_set()?;
    let jobs = FileJobSource::new(&args.inputs).jobs()?;
    if jobs.is_empty() {
        return Err(ConfigError::NoJobs.into());
    }

    let allocation = Allocation::compute(
        jobs.len(),
        endpoints.len(),
        pool_config.workers_per_endpoint,
    )?;

    println!("{}", "Allocation:".bold());
    println!("  Jobs:         {}", allocation.job_count);
    println!("  Endpoints:    {}", allocation.endpoint_count);
    println!("  Ceiling:      {} per endpoint", allocation.workers_per_endpoint);
    println!("  Budget:       {}", allocation.max_workers);
    println!(
        "  Workers:      {} per endpoint, {} total",
        allocation.per_endpoint.to_string().cyan(),
        allocation.total_workers().to_string().cyan()
    );
    if allocation.idle_workers() > 0 {
        println!(
            "  Idle:         {}",
            allocation.idle_workers().to_string().yellow()
        );
    }

    println!("\n{}", "Endpoints:".bold());
    for endpoint in &endpoints {
        println!("  {} {}", "▸".cyan(), endpoint);
    }

    Ok(())
}
