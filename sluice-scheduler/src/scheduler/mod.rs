//! Scheduler layer
//!
//! Drains a shared backlog of jobs through a fixed set of workers, each
//! bound to one endpoint, and gathers one outcome per job.

pub mod backlog;
pub mod pool;
pub mod worker;

pub use backlog::Backlog;
pub use pool::{RunReport, WorkerPool};
