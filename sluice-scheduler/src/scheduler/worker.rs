//! Worker loop
//!
//! A worker is bound to one endpoint and drains the shared backlog one job
//! at a time until the backlog reports empty. It only suspends while the
//! remote call is in progress.

use sluice_core::SchedulerError;
use sluice_core::domain::endpoint::Endpoint;
use sluice_core::domain::outcome::Outcome;
use std::sync::Arc;
use tracing::debug;

use crate::scheduler::backlog::Backlog;
use crate::service::{RemoteClient, Reporter};

/// One concurrency slot against one endpoint
pub struct Worker {
    id: usize,
    endpoint: Endpoint,
    backlog: Arc<Backlog>,
    client: Arc<dyn RemoteClient>,
    reporter: Arc<dyn Reporter>,
}

impl Worker {
    pub fn new(
        id: usize,
        endpoint: Endpoint,
        backlog: Arc<Backlog>,
        client: Arc<dyn RemoteClient>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            id,
            endpoint,
            backlog,
            client,
            reporter,
        }
    }

    /// Processes jobs until the backlog is empty
    ///
    /// Per-job failures are reported and skipped. Only a broken backlog
    /// invariant ends the loop early.
    ///
    /// # Returns
    /// The outcomes this worker produced, in processing order
    pub async fn run(self) -> Result<Vec<Outcome>, SchedulerError> {
        debug!("Worker {} started on {}", self.id, self.endpoint);

        let mut outcomes = Vec::new();

        while let Some(job) = self.backlog.try_dequeue()? {
            let outcome = self.client.submit(&self.endpoint, &job).await;

            if outcome.job_id != job.id {
                return Err(SchedulerError::invariant(format!(
                    "worker {} submitted job {} but received an outcome for job {}",
                    self.id, job.id, outcome.job_id
                )));
            }

            self.reporter.report(&outcome);
            self.backlog.mark_completed(job.id)?;
            outcomes.push(outcome);
        }

        debug!(
            "Worker {} on {} exiting after {} job(s)",
            self.id,
            self.endpoint,
            outcomes.len()
        );

        Ok(outcomes)
    }
}
