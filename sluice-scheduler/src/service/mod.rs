//! Service layer
//!
//! The two seams of the worker pool: how a job reaches an endpoint
//! (`RemoteClient`) and where its outcome goes (`Reporter`).
//!
//! Both are trait-based so the pool can be driven by test doubles.

mod remote;
mod reporter;

// Re-export traits
pub use remote::RemoteClient;
pub use reporter::Reporter;

// Re-export implementations
pub use remote::HttpRemoteClient;
pub use reporter::{MemoryReporter, TracingReporter};
