//! Sluice Scheduler
//!
//! Distributes a batch of document-parsing jobs across a pool of remote
//! endpoints.
//!
//! Architecture:
//! - Configuration: Endpoints, per-endpoint worker ceiling and parser options
//! - Source: Expands input paths into an ordered list of jobs
//! - Services: The remote client and reporter seams
//! - Scheduler: Backlog, workers and the pool that drives them
//!
//! Every job ends in exactly one outcome. A failing job never stops the
//! others; only configuration errors and broken invariants abort a run.

pub mod config;
pub mod scheduler;
pub mod service;
pub mod source;

pub use config::PoolConfig;
pub use scheduler::{Backlog, RunReport, WorkerPool};
pub use service::{HttpRemoteClient, MemoryReporter, RemoteClient, Reporter, TracingReporter};
pub use source::FileJobSource;
