//! Login endpoint.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{
    dto::{LoginRequest, LoginResponse},
    errors,
    services::AppServices,
};

/// POST /login
///
/// Validate the configured credentials and hand out a bearer token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    match services.gate.issue_token(&body.username, &body.password) {
        Ok(token) => (StatusCode::OK, Json(LoginResponse { token })).into_response(),
        Err(e) => errors::auth_error_to_response(&e),
    }
}
