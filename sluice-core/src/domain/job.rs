//! Job domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Options forwarded verbatim to the endpoint with every job
pub type Parameters = HashMap<String, serde_json::Value>;

/// Position of a job within its batch
///
/// Two jobs naming the same file still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub usize);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One file to process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub file_path: PathBuf,
    pub parameters: Parameters,
}

impl Job {
    pub fn new(id: JobId, file_path: impl Into<PathBuf>, parameters: Parameters) -> Self {
        Self {
            id,
            file_path: file_path.into(),
            parameters,
        }
    }

    /// Builds an ordered batch, numbering jobs from zero
    ///
    /// Every job receives its own copy of `parameters`.
    pub fn batch<I, P>(paths: I, parameters: &Parameters) -> Vec<Job>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| Job::new(JobId(index), path, parameters.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_assigns_sequential_ids() {
        let mut params = Parameters::new();
        params.insert("parse_method".to_string(), json!("ocr"));

        let jobs = Job::batch(["a.pdf", "b.pdf", "a.pdf"], &params);

        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].id, JobId(0));
        assert_eq!(jobs[2].id, JobId(2));
        assert_eq!(jobs[2].file_path, PathBuf::from("a.pdf"));
        assert_ne!(jobs[0].id, jobs[2].id);
        assert!(jobs.iter().all(|j| j.parameters["parse_method"] == json!("ocr")));
    }

    #[test]
    fn test_job_id_display() {
        assert_eq!(JobId(7).to_string(), "#7");
    }
}
