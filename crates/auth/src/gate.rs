//! Request gating: credential checks, token issue/verify, path exemptions.

use chrono::Utc;
use jsonwebtoken::{
    errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use crate::claims::Claims;
use crate::config::AuthConfig;

/// Path prefixes that bypass authentication entirely.
pub const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/healthz",
    "/readyz",
    "/livez",
    "/docs",
    "/openapi.json",
    "/metrics",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing or invalid token")]
    MissingOrInvalidHeader,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token")]
    TokenInvalid,

    #[error("token signing failed")]
    Signing,
}

/// Stateless authentication gate.
///
/// Verification needs no session lookup: tokens carry subject and expiry,
/// signed with the configured secret.
pub struct AuthGate {
    config: AuthConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl AuthGate {
    pub fn new(config: AuthConfig) -> Self {
        let encoding = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding = DecodingKey::from_secret(config.secret.as_bytes());

        // Zero leeway: a token is expired the second its `exp` passes.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            config,
            encoding,
            decoding,
            validation,
        }
    }

    /// Validate credentials against the single configured identity and issue
    /// a time-limited token for the subject.
    pub fn issue_token(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username != self.config.username || password != self.config.password {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.config.token_ttl,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::Signing)
    }

    /// Decode and verify a token, distinguishing expiry from every other
    /// structural or signature problem.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }

    /// Whether a request path is exempt from authentication (prefix match).
    pub fn is_public(&self, path: &str) -> bool {
        PUBLIC_PATHS.iter().any(|p| path.starts_with(p))
    }

    /// Gate one request: exempt paths pass through with no claim; everything
    /// else requires a well-formed `Bearer <token>` header whose token
    /// verifies.
    pub fn authorize(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<Option<Claims>, AuthError> {
        if self.is_public(path) {
            return Ok(None);
        }

        let header = authorization.ok_or(AuthError::MissingOrInvalidHeader)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingOrInvalidHeader)?
            .trim();
        if token.is_empty() {
            return Err(AuthError::MissingOrInvalidHeader);
        }

        self.verify_token(token).map(Some)
    }
}
