//! Worker allocation
//!
//! A run distributes a capped worker budget evenly across its endpoints.
//! The allocation is computed once, up front, and never rebalanced.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of workers bound to each endpoint for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub job_count: usize,
    pub endpoint_count: usize,
    /// Configured ceiling of concurrent workers per endpoint
    pub workers_per_endpoint: usize,
    /// `min(jobs, ceiling * endpoints)`
    pub max_workers: usize,
    /// Workers actually spawned for every endpoint
    pub per_endpoint: usize,
}

impl Allocation {
    /// Computes the allocation for a run
    ///
    /// The worker budget is `min(job_count, workers_per_endpoint * endpoint_count)`,
    /// split with floor division and never less than one per endpoint. The
    /// remainder of the division is left unallocated.
    ///
    /// # Errors
    /// Returns `NoEndpoints` or `InvalidWorkerCeiling` when either input is zero.
    pub fn compute(
        job_count: usize,
        endpoint_count: usize,
        workers_per_endpoint: usize,
    ) -> Result<Self, ConfigError> {
        if endpoint_count == 0 {
            return Err(ConfigError::NoEndpoints);
        }
        if workers_per_endpoint == 0 {
            return Err(ConfigError::InvalidWorkerCeiling(workers_per_endpoint));
        }

        let max_workers = job_count.min(workers_per_endpoint.saturating_mul(endpoint_count));
        let per_endpoint = (max_workers / endpoint_count).max(1);

        Ok(Self {
            job_count,
            endpoint_count,
            workers_per_endpoint,
            max_workers,
            per_endpoint,
        })
    }

    /// Total number of workers across all endpoints
    pub fn total_workers(&self) -> usize {
        self.per_endpoint * self.endpoint_count
    }

    /// Workers that will find the backlog empty on their first dequeue
    pub fn idle_workers(&self) -> usize {
        self.total_workers().saturating_sub(self.job_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let alloc = Allocation::compute(10, 2, 16).unwrap();
        assert_eq!(alloc.max_workers, 10);
        assert_eq!(alloc.per_endpoint, 5);
        assert_eq!(alloc.total_workers(), 10);
        assert_eq!(alloc.idle_workers(), 0);
    }

    #[test]
    fn test_fewer_jobs_than_endpoints() {
        let alloc = Allocation::compute(3, 5, 16).unwrap();
        assert_eq!(alloc.max_workers, 3);
        assert_eq!(alloc.per_endpoint, 1);
        assert_eq!(alloc.total_workers(), 5);
        assert_eq!(alloc.idle_workers(), 2);
    }

    #[test]
    fn test_ceiling_caps_workers() {
        let alloc = Allocation::compute(1000, 3, 4).unwrap();
        assert_eq!(alloc.max_workers, 12);
        assert_eq!(alloc.per_endpoint, 4);
        assert_eq!(alloc.total_workers(), 12);
    }

    #[test]
    fn test_remainder_is_not_redistributed() {
        let alloc = Allocation::compute(7, 2, 16).unwrap();
        assert_eq!(alloc.max_workers, 7);
        assert_eq!(alloc.per_endpoint, 3);
        assert_eq!(alloc.total_workers(), 6);
    }

    #[test]
    fn test_zero_jobs() {
        let alloc = Allocation::compute(0, 2, 16).unwrap();
        assert_eq!(alloc.max_workers, 0);
        assert_eq!(alloc.per_endpoint, 1);
    }

    #[test]
    fn test_rejects_zero_endpoints() {
        assert_eq!(
            Allocation::compute(10, 0, 16),
            Err(ConfigError::NoEndpoints)
        );
    }

    #[test]
    fn test_rejects_zero_ceiling() {
        assert_eq!(
            Allocation::compute(10, 2, 0),
            Err(ConfigError::InvalidWorkerCeiling(0))
        );
    }
}
