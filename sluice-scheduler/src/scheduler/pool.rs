//! Worker pool
//!
//! Allocates workers to endpoints, drains the backlog through them and
//! collects exactly one outcome per job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sluice_core::domain::endpoint::EndpointSet;
use sluice_core::domain::job::{Job, JobId};
use sluice_core::domain::outcome::Outcome;
use sluice_core::{Allocation, ConfigError, SchedulerError};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::PoolConfig;
use crate::scheduler::backlog::Backlog;
use crate::scheduler::worker::Worker;
use crate::service::{RemoteClient, Reporter};

/// Schedules a batch of jobs across a fixed set of endpoints
pub struct WorkerPool {
    endpoints: EndpointSet,
    workers_per_endpoint: usize,
    client: Arc<dyn RemoteClient>,
    reporter: Arc<dyn Reporter>,
}

impl WorkerPool {
    /// Creates a pool
    ///
    /// # Errors
    /// Returns `InvalidWorkerCeiling` if `workers_per_endpoint` is zero.
    pub fn new(
        endpoints: EndpointSet,
        workers_per_endpoint: usize,
        client: Arc<dyn RemoteClient>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, ConfigError> {
        if workers_per_endpoint == 0 {
            return Err(ConfigError::InvalidWorkerCeiling(workers_per_endpoint));
        }

        Ok(Self {
            endpoints,
            workers_per_endpoint,
            client,
            reporter,
        })
    }

    /// Creates a pool from a validated configuration
    pub fn from_config(
        config: &PoolConfig,
        client: Arc<dyn RemoteClient>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            config.endpoint_set()?,
            config.workers_per_endpoint,
            client,
            reporter,
        )
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// The allocation a run of `job_count` jobs would use
    pub fn plan(&self, job_count: usize) -> Result<Allocation, ConfigError> {
        Allocation::compute(job_count, self.endpoints.len(), self.workers_per_endpoint)
    }

    /// Runs every job to an outcome
    ///
    /// Individual job failures do not fail the run; they show up as failure
    /// outcomes in the report.
    ///
    /// # Errors
    /// Returns a `SchedulerError` only for a fatal configuration problem, a
    /// broken scheduling invariant or a panicked worker.
    pub async fn run(&self, jobs: Vec<Job>) -> Result<RunReport, SchedulerError> {
        let started_at = Utc::now();
        let allocation = self.plan(jobs.len())?;

        if jobs.is_empty() {
            warn!("No jobs to dispatch");
            return Ok(RunReport::new(allocation, started_at, Vec::new()));
        }

        if allocation.per_endpoint == 0 {
            return Err(SchedulerError::invariant(
                "computed zero workers per endpoint with jobs remaining",
            ));
        }

        let mut expected: Vec<JobId> = jobs.iter().map(|job| job.id).collect();
        expected.sort_unstable();

        let backlog = Arc::new(Backlog::new(jobs));

        info!(
            "Dispatching {} job(s) to {} endpoint(s) with {} worker(s) each",
            backlog.total(),
            allocation.endpoint_count,
            allocation.per_endpoint
        );
        if allocation.idle_workers() > 0 {
            info!(
                "{} worker(s) will find the backlog empty",
                allocation.idle_workers()
            );
        }

        let mut handles = Vec::with_capacity(allocation.total_workers());
        for endpoint in &self.endpoints {
            for _ in 0..allocation.per_endpoint {
                let worker = Worker::new(
                    handles.len(),
                    endpoint.clone(),
                    Arc::clone(&backlog),
                    Arc::clone(&self.client),
                    Arc::clone(&self.reporter),
                );
                handles.push(tokio::spawn(worker.run()));
            }
        }

        let mut outcomes = Vec::with_capacity(backlog.total());
        let mut fatal = None;

        for handle in handles {
            match handle.await {
                Ok(Ok(worker_outcomes)) => outcomes.extend(worker_outcomes),
                Ok(Err(e)) => {
                    error!("Worker failed: {}", e);
                    fatal = fatal.or(Some(e));
                }
                Err(e) => {
                    error!("Worker task panicked: {}", e);
                    fatal = fatal.or(Some(SchedulerError::WorkerPanicked(e.to_string())));
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e);
        }

        if !backlog.is_finished() {
            return Err(SchedulerError::invariant(format!(
                "all workers exited with {} of {} job(s) completed",
                backlog.completed(),
                backlog.total()
            )));
        }

        outcomes.sort_by_key(|outcome| outcome.job_id);
        let produced: Vec<JobId> = outcomes.iter().map(|outcome| outcome.job_id).collect();
        if produced != expected {
            return Err(SchedulerError::invariant(format!(
                "expected one outcome for each of {} job(s), got {}",
                expected.len(),
                produced.len()
            )));
        }

        let report = RunReport::new(allocation, started_at, outcomes);
        info!(
            "Run finished: {} succeeded, {} failed",
            report.success_count(),
            report.failure_count()
        );

        Ok(report)
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub allocation: Allocation,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One outcome per job, ordered by job id
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    fn new(allocation: Allocation, started_at: DateTime<Utc>, outcomes: Vec<Outcome>) -> Self {
        Self {
            allocation,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        }
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.signed_duration_since(self.started_at)
    }
}
