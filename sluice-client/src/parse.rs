//! Parse endpoint calls

use base64::{Engine as _, engine::general_purpose};
use sluice_core::domain::endpoint::Endpoint;
use sluice_core::domain::job::Parameters;
use sluice_core::dto::parse::{ParseRequest, ParseResponse};
use std::path::Path;
use tracing::debug;

use crate::ParseClient;
use crate::error::{ClientError, Result};

/// Reads a file and returns its content base64 encoded
pub async fn encode_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::Payload {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(general_purpose::STANDARD.encode(bytes))
}

impl ParseClient {
    /// Submit an already encoded document
    ///
    /// # Arguments
    /// * `endpoint` - The endpoint to post to
    /// * `request` - Encoded file and parser options
    ///
    /// # Returns
    /// The endpoint's response, which always names an output location
    pub async fn parse(&self, endpoint: &Endpoint, request: &ParseRequest) -> Result<ParseResponse> {
        let response = self
            .client
            .post(endpoint.as_str())
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Read, encode and submit a file
    ///
    /// # Arguments
    /// * `endpoint` - The endpoint to post to
    /// * `path` - The file to parse
    /// * `kwargs` - Parser options, forwarded verbatim
    pub async fn parse_file(
        &self,
        endpoint: &Endpoint,
        path: impl AsRef<Path>,
        kwargs: &Parameters,
    ) -> Result<ParseResponse> {
        let path = path.as_ref();
        let file = encode_file(path).await?;

        debug!(
            "Submitting {} ({} encoded bytes) to {}",
            path.display(),
            file.len(),
            endpoint
        );

        let request = ParseRequest {
            file,
            kwargs: kwargs.clone(),
        };

        self.parse(endpoint, &request).await
    }
}
