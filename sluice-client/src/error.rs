//! Error types for the Sluice client

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while submitting a file to an endpoint
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, reset, DNS, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Endpoint returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The job's file could not be read
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Payload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Human-readable description used as a failure outcome's message
    ///
    /// For an error status this is the response body, when there is one.
    /// The result is never empty.
    pub fn failure_message(&self) -> String {
        match self {
            Self::ApiError { status, message } if message.trim().is_empty() => {
                format!("endpoint returned status {} with an empty body", status)
            }
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
