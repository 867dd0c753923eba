//! Run command handler
//!
//! Collects jobs, dispatches them through the worker pool and summarizes
//! the outcomes.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use serde_json::Value;
use sluice_core::ConfigError;
use sluice_core::domain::outcome::Outcome;
use sluice_scheduler::{FileJobSource, HttpRemoteClient, RunReport, TracingReporter, WorkerPool};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;

#[derive(Args)]
pub struct RunArgs {
    /// Files or directories to parse
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Parser option sent with every job, as key=value (value parsed as JSON when possible)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, Value)>,

    /// Write the full run report to this file as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Exit with an error if any job failed
    #[arg(long)]
    fail_on_error: bool,
}

pub async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let pool_config = config.pool_config(args.params.into_iter().collect());
    pool_config.validate()?;

    let jobs = FileJobSource::new(&args.inputs)
        .with_parameters(pool_config.parameters.clone())
        .jobs()?;
    if jobs.is_empty() {
        return Err(ConfigError::NoJobs.into());
    }

    let pool = WorkerPool::from_config(
        &pool_config,
        Arc::new(HttpRemoteClient::default()),
        Arc::new(TracingReporter),
    )?;

    let report = pool.run(jobs).await.context("Run aborted")?;

    print_summary(&report);

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report written to {}", path.display().to_string().cyan());
    }

    if args.fail_on_error && report.failure_count() > 0 {
        bail!("{} job(s) failed", report.failure_count());
    }

    Ok(())
}

/// Parses a `key=value` option
///
/// The value is taken as JSON when it parses, otherwise as a plain string,
/// so `debug_able=false` is a boolean and `lang=en` a string.
fn parse_param(input: &str) -> std::result::Result<(String, Value), String> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter '{}': expected key=value", input))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid parameter '{}': empty key", input));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Print the run summary
fn print_summary(report: &RunReport) {
    println!();
    println!("{}", "Run Summary:".bold());
    println!(
        "  Workers:    {} endpoint(s) x {}",
        report.allocation.endpoint_count, report.allocation.per_endpoint
    );
    println!("  Jobs:       {}", report.outcomes.len());
    println!(
        "  Succeeded:  {}",
        report.success_count().to_string().green()
    );
    println!("  Failed:     {}", colorize_failures(report.failure_count()));
    println!("  Duration:   {}s", report.elapsed().num_seconds());

    if report.outcomes.is_empty() {
        return;
    }

    println!("\n{}", "Outcomes:".bold());
    for outcome in &report.outcomes {
        print_outcome(outcome);
    }
}

fn print_outcome(outcome: &Outcome) {
    if outcome.is_success() {
        println!(
            "  {} {} {}",
            "✓".green(),
            outcome.file_path.display(),
            outcome.detail().dimmed()
        );
    } else {
        println!(
            "  {} {} {}",
            "✗".red(),
            outcome.file_path.display(),
            outcome.detail().red()
        );
    }
}

fn colorize_failures(count: usize) -> colored::ColoredString {
    if count == 0 {
        count.to_string().green()
    } else {
        count.to_string().red()
    }
}
