//! Shared service wiring for the HTTP layer.

use std::sync::Arc;

use admitd_auth::{AuthConfig, AuthGate};
use admitd_jobs::{BatchProcessor, JobStore};
use admitd_predictor::Predictor;

/// Everything the handlers need, wired once at startup and shared via
/// `Extension<Arc<AppServices>>`.
pub struct AppServices {
    pub gate: Arc<AuthGate>,
    pub store: JobStore,
    pub processor: BatchProcessor,
    pub predictor: Arc<dyn Predictor>,
}

pub fn build_services(config: AuthConfig, predictor: Arc<dyn Predictor>) -> AppServices {
    let gate = Arc::new(AuthGate::new(config));
    let store = JobStore::new();
    let processor = BatchProcessor::new(store.clone(), predictor.clone());

    AppServices {
        gate,
        store,
        processor,
        predictor,
    }
}
