//! `admitd-core` — shared domain types for the admission prediction service.
//!
//! This crate is intentionally decoupled from HTTP, storage, and the model:
//! feature records with their documented bounds, the prediction output record,
//! strongly-typed identifiers, and the domain error model.

pub mod error;
pub mod features;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use features::{AdmissionInput, Prediction, validate_batch, FEATURE_COUNT, MAX_BATCH_SIZE};
pub use id::JobId;
