//! Background execution of batch jobs.

use std::sync::Arc;

use tokio::sync::Semaphore;

use admitd_core::{AdmissionInput, JobId, Prediction};
use admitd_predictor::{PredictError, Predictor};

use crate::store::{JobStore, JobStoreError};

/// Upper bound on batches processed concurrently. Submissions beyond the
/// limit queue on the semaphore inside their own background task, so the
/// submit request itself never waits.
const DEFAULT_MAX_CONCURRENT_JOBS: usize = 32;

/// Drives one job per dispatch from `pending` to a terminal state.
///
/// Failure containment: every predictor error, panic, or store error is
/// recorded on (or logged against) the owning job; nothing escapes to other
/// jobs or the caller.
#[derive(Clone)]
pub struct BatchProcessor {
    store: JobStore,
    predictor: Arc<dyn Predictor>,
    permits: Arc<Semaphore>,
}

impl BatchProcessor {
    pub fn new(store: JobStore, predictor: Arc<dyn Predictor>) -> Self {
        Self::with_concurrency_limit(store, predictor, DEFAULT_MAX_CONCURRENT_JOBS)
    }

    pub fn with_concurrency_limit(
        store: JobStore,
        predictor: Arc<dyn Predictor>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            store,
            predictor,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Spawn the background execution for a freshly created job and return
    /// immediately. The spawned task outlives the request that dispatched it.
    pub fn dispatch(&self, job_id: JobId) {
        let this = self.clone();
        tokio::spawn(async move {
            let _permit = match this.permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                // Semaphore is never closed while the processor is alive.
                Err(_) => return,
            };

            if let Err(e) = this.run(job_id).await {
                tracing::error!(%job_id, "batch execution could not record outcome: {e}");
            }
        });
    }

    async fn run(&self, job_id: JobId) -> Result<(), JobStoreError> {
        self.store.mark_processing(&job_id).await?;

        let job = self.store.get(&job_id).await.ok_or(JobStoreError::NotFound)?;
        let inputs = job.inputs.clone();
        let predictor = self.predictor.clone();

        // The predictor is CPU-bound and synchronous; keep it off the async
        // workers so in-flight requests are not stalled.
        let outcome =
            tokio::task::spawn_blocking(move || predict_all(predictor.as_ref(), &inputs)).await;

        match outcome {
            Ok(Ok(results)) => self.store.complete(&job_id, results).await,
            Ok(Err(e)) => self.store.fail(&job_id, e.to_string()).await,
            Err(e) => {
                self.store
                    .fail(&job_id, format!("batch execution panicked: {e}"))
                    .await
            }
        }
    }
}

/// Run the predictor over every input, preserving input order. The first
/// error aborts the whole batch (all-or-nothing, no partial results).
fn predict_all(
    predictor: &dyn Predictor,
    inputs: &[AdmissionInput],
) -> Result<Vec<Prediction>, PredictError> {
    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        let chance_of_admit = predictor.predict(&input.to_features())?;
        results.push(Prediction { chance_of_admit });
    }
    Ok(results)
}
