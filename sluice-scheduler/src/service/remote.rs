//! Remote client
//!
//! Submits one job to one endpoint and turns whatever happens into an
//! outcome. Nothing here can fail the calling worker.

use async_trait::async_trait;
use sluice_client::ParseClient;
use sluice_core::domain::endpoint::Endpoint;
use sluice_core::domain::job::Job;
use sluice_core::domain::outcome::Outcome;
use tracing::debug;

/// Executes a single job against a single endpoint
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Submits `job` to `endpoint` and waits for it to finish
    ///
    /// Transport failures, error statuses and malformed responses all come
    /// back as failure outcomes carrying the job's identifier.
    async fn submit(&self, endpoint: &Endpoint, job: &Job) -> Outcome;
}

/// JSON-over-HTTP implementation backed by [`ParseClient`]
#[derive(Debug, Clone, Default)]
pub struct HttpRemoteClient {
    client: ParseClient,
}

impl HttpRemoteClient {
    pub fn new(client: ParseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn submit(&self, endpoint: &Endpoint, job: &Job) -> Outcome {
        match self
            .client
            .parse_file(endpoint, &job.file_path, &job.parameters)
            .await
        {
            Ok(response) => Outcome::succeeded(job, endpoint, response.attribute(&job.file_path)),
            Err(e) => {
                debug!("Job {} failed on {}: {}", job.id, endpoint, e);
                Outcome::failed(job, endpoint, e.failure_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_core::domain::job::{JobId, Parameters};

    #[tokio::test]
    async fn test_unreadable_file_becomes_failure() {
        let client = HttpRemoteClient::default();
        let endpoint = Endpoint::new("http://127.0.0.1:9/predict").unwrap();
        let job = Job::new(JobId(3), "/no/such/file.pdf", Parameters::new());

        let outcome = client.submit(&endpoint, &job).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.job_id, JobId(3));
        assert!(outcome.detail().contains("/no/such/file.pdf"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_becomes_failure() {
        let path = std::env::temp_dir().join(format!("sluice-remote-{}.pdf", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"%PDF").unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Endpoint::new(format!("http://{}/predict", addr)).unwrap();
        let job = Job::new(JobId(0), &path, Parameters::new());

        let outcome = HttpRemoteClient::default().submit(&endpoint, &job).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.file_path, path);
        assert!(!outcome.detail().is_empty());
        std::fs::remove_file(path).unwrap();
    }
}
