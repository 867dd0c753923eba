//! Outcome reporters
//!
//! A reporter observes every outcome as soon as it is produced. It is
//! injected into the pool rather than configured globally.

use sluice_core::domain::outcome::Outcome;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// Sink for per-job outcomes
///
/// Called concurrently from many workers, in completion order.
pub trait Reporter: Send + Sync {
    fn report(&self, outcome: &Outcome);
}

/// Logs one line per outcome through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, outcome: &Outcome) {
        if outcome.is_success() {
            info!(
                job = %outcome.job_id,
                endpoint = %outcome.endpoint,
                "File: {} - Info: {}",
                outcome.file_path.display(),
                outcome.detail()
            );
        } else {
            error!(
                job = %outcome.job_id,
                endpoint = %outcome.endpoint,
                "File: {} - Info: {}",
                outcome.file_path.display(),
                outcome.detail()
            );
        }
    }
}

/// Collects outcomes in memory
///
/// Uses Arc<Mutex<Vec<Outcome>>> so clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    outcomes: Arc<Mutex<Vec<Outcome>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.outcomes.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, outcome: &Outcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(outcome.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use sluice_core::domain::endpoint::Endpoint;
    use sluice_core::domain::job::{Job, JobId, Parameters};
    use sluice_core::dto::parse::ParseResult;
    use std::io::Write;

    /// Log output captured in memory
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn capture(outcome: &Outcome) -> Vec<String> {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || TracingReporter.report(outcome));

        captured.lines()
    }

    #[test]
    fn test_memory_reporter_shares_buffer() {
        let reporter = MemoryReporter::new();
        let clone = reporter.clone();
        let endpoint = Endpoint::new("http://gpu-0:8000/predict").unwrap();
        let job = Job::new(JobId(1), "a.pdf", Parameters::new());

        clone.report(&Outcome::failed(&job, &endpoint, "boom"));

        assert_eq!(reporter.len(), 1);
        assert_eq!(reporter.outcomes()[0].detail(), "boom");
    }

    #[test]
    fn test_tracing_reporter_success_line() {
        let endpoint = Endpoint::new("http://gpu-0:8000/predict").unwrap();
        let job = Job::new(JobId(2), "scans/invoice.pdf", Parameters::new());
        let result = ParseResult {
            file_path: job.file_path.clone(),
            output_dir: "/tmp/out/invoice".to_string(),
            extra: Map::new(),
        };

        let lines = capture(&Outcome::succeeded(&job, &endpoint, result));

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("scans/invoice.pdf"));
        assert!(lines[0].contains("/tmp/out/invoice"));
    }

    #[test]
    fn test_tracing_reporter_failure_line() {
        let endpoint = Endpoint::new("http://gpu-0:8000/predict").unwrap();
        let job = Job::new(JobId(5), "scans/broken.pdf", Parameters::new());

        let lines = capture(&Outcome::failed(&job, &endpoint, "Unsupported file format"));

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("scans/broken.pdf"));
        assert!(lines[0].contains("Unsupported file format"));
    }
}
