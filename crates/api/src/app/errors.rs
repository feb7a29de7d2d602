use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use admitd_auth::AuthError;
use admitd_core::DomainError;

pub fn auth_error_to_response(err: &AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", "Invalid credentials")
        }
        AuthError::MissingOrInvalidHeader => json_error(
            StatusCode::UNAUTHORIZED,
            "missing_or_invalid_token",
            "Missing or invalid token",
        ),
        AuthError::TokenExpired => {
            json_error(StatusCode::UNAUTHORIZED, "token_expired", "Token expired")
        }
        AuthError::TokenInvalid => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_token", "Invalid token")
        }
        AuthError::Signing => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "token_signing_failed",
            "could not sign token",
        ),
    }
}

pub fn domain_error_to_response(err: &DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg.clone())
        }
        DomainError::InvalidId(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg.clone())
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
