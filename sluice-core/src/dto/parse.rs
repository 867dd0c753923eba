//! Parse request/response DTOs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::domain::job::Parameters;

/// Body of a parse request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    /// File content, base64 encoded
    pub file: String,
    /// Options forwarded to the parser untouched
    pub kwargs: Parameters,
}

/// Body of a successful parse response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Where the endpoint wrote its output
    pub output_dir: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParseResponse {
    /// Attaches the originating file to the response
    ///
    /// The job's path always wins over a `file_path` field sent back by the
    /// endpoint.
    pub fn attribute(mut self, file_path: impl Into<PathBuf>) -> ParseResult {
        self.extra.remove("file_path");
        ParseResult {
            file_path: file_path.into(),
            output_dir: self.output_dir,
            extra: self.extra,
        }
    }
}

/// A parse response attributed to the job that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub file_path: PathBuf,
    pub output_dir: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
