//! `admitd-jobs` — asynchronous batch job lifecycle manager.
//!
//! Two pieces:
//! - [`JobStore`]: concurrency-safe in-memory registry of job records with a
//!   monotonic state machine (`pending → processing → {completed | failed}`).
//! - [`BatchProcessor`]: the background execution that drives one job from
//!   `pending` to a terminal state by running the predictor over every input.
//!
//! Job records live for the life of the process; there is no persistence and
//! no automatic eviction (see `JobStore::reap_terminal_before` for the
//! explicit reaping hook).

pub mod job;
pub mod processor;
pub mod store;

pub use job::{Job, JobStatus};
pub use processor::BatchProcessor;
pub use store::{JobStore, JobStoreError};
