//! Shared job backlog
//!
//! The only mutable state workers share. Dequeue is atomic and delivers each
//! job at most once; completion is tracked separately so that "queue empty"
//! and "all work finished" can be told apart.

use sluice_core::SchedulerError;
use sluice_core::domain::job::{Job, JobId};
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

struct BacklogState {
    pending: VecDeque<Job>,
    /// Every id handed out so far
    delivered: HashSet<JobId>,
    in_flight: HashSet<JobId>,
    completed: usize,
}

/// Concurrency-safe queue of jobs waiting for a worker
pub struct Backlog {
    state: Mutex<BacklogState>,
    total: usize,
}

impl Backlog {
    /// Creates a backlog holding every job of the run
    pub fn new(jobs: Vec<Job>) -> Self {
        let total = jobs.len();
        Self {
            state: Mutex::new(BacklogState {
                pending: jobs.into(),
                delivered: HashSet::with_capacity(total),
                in_flight: HashSet::new(),
                completed: 0,
            }),
            total,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BacklogState> {
        // No lock holder can panic midway through an update, so a poisoned
        // state is still consistent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Takes the next job without waiting
    ///
    /// Returns `Ok(None)` once every job has been handed out.
    ///
    /// # Errors
    /// Returns `InvariantViolation` if a job would be delivered twice.
    pub fn try_dequeue(&self) -> Result<Option<Job>, SchedulerError> {
        let mut state = self.lock();

        let Some(job) = state.pending.pop_front() else {
            return Ok(None);
        };

        if !state.delivered.insert(job.id) {
            return Err(SchedulerError::invariant(format!(
                "job {} delivered twice",
                job.id
            )));
        }
        state.in_flight.insert(job.id);

        Ok(Some(job))
    }

    /// Records that a dequeued job has produced its outcome
    ///
    /// # Errors
    /// Returns `InvariantViolation` if the job is not currently in flight.
    pub fn mark_completed(&self, id: JobId) -> Result<(), SchedulerError> {
        let mut state = self.lock();
        if !state.in_flight.remove(&id) {
            return Err(SchedulerError::invariant(format!(
                "job {} completed without being in flight",
                id
            )));
        }
        state.completed += 1;

        Ok(())
    }

    /// Number of jobs the backlog was created with
    pub fn total(&self) -> usize {
        self.total
    }

    /// Jobs dequeued and marked completed
    pub fn completed(&self) -> usize {
        self.lock().completed
    }

    /// Every job has been dequeued and completed
    ///
    /// An empty queue alone is not enough: a job handed out last may still
    /// be in flight.
    pub fn is_finished(&self) -> bool {
        let state = self.lock();
        state.pending.is_empty() && state.in_flight.is_empty() && state.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_core::domain::job::Parameters;
    use std::sync::Arc;

    fn jobs(count: usize) -> Vec<Job> {
        Job::batch((0..count).map(|i| format!("doc-{i}.pdf")), &Parameters::new())
    }

    #[test]
    fn test_dequeue_until_empty() {
        let backlog = Backlog::new(jobs(2));

        assert_eq!(backlog.try_dequeue().unwrap().unwrap().id, JobId(0));
        assert_eq!(backlog.try_dequeue().unwrap().unwrap().id, JobId(1));
        assert!(backlog.try_dequeue().unwrap().is_none());
    }

    #[test]
    fn test_empty_queue_is_not_finished_while_in_flight() {
        let backlog = Backlog::new(jobs(1));
        let job = backlog.try_dequeue().unwrap().unwrap();

        assert!(backlog.try_dequeue().unwrap().is_none());
        assert!(!backlog.is_finished());

        backlog.mark_completed(job.id).unwrap();
        assert!(backlog.is_finished());
        assert_eq!(backlog.completed(), 1);
    }

    #[test]
    fn test_duplicate_job_id_is_violation() {
        let mut batch = jobs(2);
        batch[1].id = JobId(0);
        let backlog = Backlog::new(batch);

        backlog.try_dequeue().unwrap();
        let err = backlog.try_dequeue().unwrap_err();
        assert!(matches!(err, SchedulerError::InvariantViolation(_)));
    }

    #[test]
    fn test_completing_twice_is_violation() {
        let backlog = Backlog::new(jobs(1));
        let job = backlog.try_dequeue().unwrap().unwrap();

        backlog.mark_completed(job.id).unwrap();
        assert!(backlog.mark_completed(job.id).is_err());
    }

    #[test]
    fn test_completing_unknown_job_is_violation() {
        let backlog = Backlog::new(jobs(1));
        assert!(backlog.mark_completed(JobId(0)).is_err());
    }

    #[test]
    fn test_empty_backlog_is_finished() {
        assert!(Backlog::new(Vec::new()).is_finished());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_dequeue_delivers_each_job_once() {
        let backlog = Arc::new(Backlog::new(jobs(500)));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let backlog = Arc::clone(&backlog);
                tokio::spawn(async move {
                    let mut taken = Vec::new();
                    while let Some(job) = backlog.try_dequeue().unwrap() {
                        tokio::task::yield_now().await;
                        backlog.mark_completed(job.id).unwrap();
                        taken.push(job.id);
                    }
                    taken
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }

        all.sort();
        assert_eq!(all, (0..500).map(JobId).collect::<Vec<_>>());
        assert!(backlog.is_finished());
    }
}
