//! In-memory job registry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

use admitd_core::{AdmissionInput, JobId, Prediction};

use crate::job::{Job, JobStatus};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobStoreError {
    #[error("job not found")]
    NotFound,

    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition { from: JobStatus, to: JobStatus },
}

/// Concurrency-safe registry of job records.
///
/// One coarse `RwLock` over the whole map: status polls take the read lock
/// concurrently, transitions serialize on the write lock, and a reader that
/// starts after a transition returned always observes the new state. A write
/// to one job cannot corrupt a concurrent read of another.
///
/// Records accumulate for the life of the process; callers that care can
/// reap terminal jobs via [`JobStore::reap_terminal_before`].
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh `pending` job over an immutable input snapshot and
    /// return its identifier.
    pub async fn create(&self, inputs: Vec<AdmissionInput>) -> JobId {
        let job = Job::new(inputs);
        let id = job.id;
        self.jobs.write().await.insert(id, job);
        id
    }

    /// Cloned snapshot of the current record state.
    pub async fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    /// Move a job from `pending` to `processing`.
    pub async fn mark_processing(&self, id: &JobId) -> Result<(), JobStoreError> {
        self.transition(id, JobStatus::Processing, |_| {}).await
    }

    /// Record a successful terminal state with the full ordered result set.
    pub async fn complete(
        &self,
        id: &JobId,
        results: Vec<Prediction>,
    ) -> Result<(), JobStoreError> {
        self.transition(id, JobStatus::Completed, |job| job.results = results)
            .await
    }

    /// Record a failed terminal state with a human-readable cause.
    ///
    /// No partial results are kept; failure is all-or-nothing.
    pub async fn fail(&self, id: &JobId, cause: impl Into<String>) -> Result<(), JobStoreError> {
        let cause = cause.into();
        self.transition(id, JobStatus::Failed, move |job| job.error = Some(cause))
            .await
    }

    /// Remove terminal jobs whose completion precedes `cutoff`.
    ///
    /// Extension hook for bounding store growth; nothing in the request path
    /// calls this. Returns the number of records removed.
    pub async fn reap_terminal_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| match job.completed_at {
            Some(done) if job.status.is_terminal() => done >= cutoff,
            _ => true,
        });
        before - jobs.len()
    }

    /// Single mutation path: every status change is checked against the
    /// state machine and applied atomically under the write lock.
    async fn transition(
        &self,
        id: &JobId,
        to: JobStatus,
        apply: impl FnOnce(&mut Job),
    ) -> Result<(), JobStoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id).ok_or(JobStoreError::NotFound)?;

        if !job.status.can_transition_to(to) {
            return Err(JobStoreError::IllegalTransition {
                from: job.status,
                to,
            });
        }

        job.status = to;
        apply(job);
        if to.is_terminal() {
            job.completed_at = Some(Utc::now());
        }
        Ok(())
    }
}
