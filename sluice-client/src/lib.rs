//! Sluice HTTP Client
//!
//! A small, type-safe HTTP client for submitting documents to a remote parse
//! endpoint.
//!
//! # Example
//!
//! ```no_run
//! use sluice_client::ParseClient;
//! use sluice_core::domain::endpoint::Endpoint;
//! use sluice_core::domain::job::Parameters;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ParseClient::new();
//!     let endpoint = Endpoint::new("http://127.0.0.1:8000/predict")?;
//!
//!     let response = client
//!         .parse_file(&endpoint, "demo/small_ocr.pdf", &Parameters::new())
//!         .await?;
//!
//!     println!("Output written to {}", response.output_dir);
//!     Ok(())
//! }
//! ```

pub mod error;
mod parse;

pub use error::{ClientError, Result};
pub use parse::encode_file;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for parse endpoints
///
/// One client can talk to any number of endpoints; the endpoint is passed
/// per request. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ParseClient {
    /// HTTP client instance
    client: Client,
}

impl ParseClient {
    /// Create a new parse client
    ///
    /// The underlying client has no overall request timeout: parsing a large
    /// document can legitimately take minutes.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new parse client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, connect timeouts, etc.
    ///
    /// # Example
    /// ```
    /// use sluice_client::ParseClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .connect_timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ParseClient::with_client(http_client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an error carrying the response
    /// body if the request failed, or deserializes the body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

impl Default for ParseClient {
    fn default() -> Self {
        Self::new()
    }
}
