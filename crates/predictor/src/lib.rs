//! `admitd-predictor`
//!
//! **Responsibility:** the prediction capability boundary.
//!
//! This crate is intentionally **not** part of the job lifecycle:
//! - It must not know about jobs, HTTP, or authentication.
//! - It maps one feature vector to one scalar probability.
//! - Implementations must be safe for unlimited concurrent invocation.

pub mod model;

pub use model::{LinearModel, PredictError, Predictor};
