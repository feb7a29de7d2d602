//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: shared service wiring (auth gate, job store, processor)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use admitd_auth::AuthConfig;
use admitd_predictor::Predictor;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AuthConfig, predictor: Arc<dyn Predictor>) -> Router {
    let services = Arc::new(services::build_services(config, predictor));
    let auth_state = middleware::AuthState {
        gate: services.gate.clone(),
    };

    // Auth wraps everything; public paths are exempted inside the gate.
    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}
