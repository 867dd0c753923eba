//! Pool configuration
//!
//! Defines the externally supplied run parameters: which endpoints to use,
//! how many jobs each may run at once and the options sent with every job.

use sluice_core::ConfigError;
use sluice_core::domain::endpoint::EndpointSet;
use sluice_core::domain::job::Parameters;

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";

/// Default ceiling of concurrent workers per endpoint
pub const DEFAULT_WORKERS_PER_ENDPOINT: usize = 16;

/// Worker pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Endpoint URLs, in dispatch order
    pub endpoints: Vec<String>,

    /// Maximum concurrent jobs sent to any single endpoint
    pub workers_per_endpoint: usize,

    /// Parser options forwarded with every job
    pub parameters: Parameters,
}

impl PoolConfig {
    /// Creates a configuration with no parser options
    pub fn new(endpoints: Vec<String>, workers_per_endpoint: usize) -> Self {
        Self {
            endpoints,
            workers_per_endpoint,
            parameters: Parameters::new(),
        }
    }

    /// Adds a parser option
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Validated, de-duplicated endpoint set
    pub fn endpoint_set(&self) -> Result<EndpointSet, ConfigError> {
        EndpointSet::new(self.endpoints.iter().cloned())
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers_per_endpoint == 0 {
            return Err(ConfigError::InvalidWorkerCeiling(self.workers_per_endpoint));
        }

        self.endpoint_set()?;

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(
            vec![DEFAULT_ENDPOINT.to_string()],
            DEFAULT_WORKERS_PER_ENDPOINT,
        )
    }
}
