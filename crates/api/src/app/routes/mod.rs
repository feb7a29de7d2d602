use axum::{
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod batch;
pub mod predict;
pub mod system;

/// Full routing tree. Authentication is applied as a layer on top; the
/// public paths here are exempted by the gate itself.
pub fn router() -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/healthz", get(system::healthz))
        .route("/readyz", get(system::readyz))
        .route("/livez", get(system::livez))
        .route("/predict", post(predict::predict))
        .nest("/batch", batch::router())
}
