//! Outcome domain types
//!
//! Every job in a run produces exactly one outcome, successful or not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::endpoint::Endpoint;
use crate::domain::job::{Job, JobId};
use crate::dto::parse::ParseResult;

/// Terminal result of processing one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub job_id: JobId,
    pub file_path: PathBuf,
    /// Endpoint the job was sent to
    pub endpoint: Endpoint,
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded { result: ParseResult },
    Failed { error: String },
}

impl Outcome {
    pub fn succeeded(job: &Job, endpoint: &Endpoint, result: ParseResult) -> Self {
        Self::finish(job, endpoint, OutcomeStatus::Succeeded { result })
    }

    /// An empty error message is replaced so the failure is always described
    pub fn failed(job: &Job, endpoint: &Endpoint, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "unknown error".to_string();
        }
        Self::finish(job, endpoint, OutcomeStatus::Failed { error })
    }

    fn finish(job: &Job, endpoint: &Endpoint, status: OutcomeStatus) -> Self {
        Self {
            job_id: job.id,
            file_path: job.file_path.clone(),
            endpoint: endpoint.clone(),
            finished_at: Utc::now(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded { .. })
    }

    /// Output location on success, error message on failure
    pub fn detail(&self) -> &str {
        match &self.status {
            OutcomeStatus::Succeeded { result } => &result.output_dir,
            OutcomeStatus::Failed { error } => error,
        }
    }

    pub fn result(&self) -> Option<&ParseResult> {
        match &self.status {
            OutcomeStatus::Succeeded { result } => Some(result),
            OutcomeStatus::Failed { .. } => None,
        }
    }
}
