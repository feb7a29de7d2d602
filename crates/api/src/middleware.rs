use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use admitd_auth::AuthGate;

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub gate: Arc<AuthGate>,
}

/// Gate every request through [`AuthGate::authorize`].
///
/// The public-path exemption lives in the gate, so this layer wraps the
/// whole router rather than a protected subtree.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let authorization = bearer_header(req.headers());

    match state.gate.authorize(&path, authorization) {
        Ok(_claims) => next.run(req).await,
        Err(e) => errors::auth_error_to_response(&e),
    }
}

fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
}
