//! Configuration module
//!
//! Handles CLI configuration shared by every command.

use sluice_core::domain::job::Parameters;
use sluice_scheduler::PoolConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Parse endpoint URLs
    pub endpoints: Vec<String>,
    /// Maximum concurrent jobs per endpoint
    pub workers_per_endpoint: usize,
}

impl Config {
    /// Builds the pool configuration for a run
    pub fn pool_config(&self, parameters: Parameters) -> PoolConfig {
        PoolConfig {
            endpoints: self.endpoints.clone(),
            workers_per_endpoint: self.workers_per_endpoint,
            parameters,
        }
    }
}
