//! Fatal error types
//!
//! Per-job failures never appear here: they are folded into failure
//! outcomes at the worker boundary. Only errors that abort a whole run do.

use thiserror::Error;

/// Result type alias for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Invalid run configuration, reported before any job is dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The run has nothing to process
    #[error("no jobs to process")]
    NoJobs,

    /// No endpoint is available to dispatch to
    #[error("at least one endpoint must be configured")]
    NoEndpoints,

    /// The per-endpoint worker ceiling must be at least one
    #[error("workers per endpoint must be at least 1 (got {0})")]
    InvalidWorkerCeiling(usize),

    /// An endpoint address could not be accepted
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The rejected address
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The run was misconfigured
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scheduler broke one of its own guarantees
    #[error("scheduler invariant violated: {0}")]
    InvariantViolation(String),

    /// A worker task panicked, losing the job it held
    #[error("worker task panicked: {0}")]
    WorkerPanicked(String),
}

impl SchedulerError {
    /// Create an invariant violation from a description
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Check if this error was raised before any job was dispatched
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
