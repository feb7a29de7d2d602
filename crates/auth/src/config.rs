//! Authentication configuration.

use chrono::Duration;

/// Settings for token issuance and credential checks.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing/verification.
    pub secret: String,

    /// Fixed lifetime applied to every issued token.
    pub token_ttl: Duration,

    /// The single configured identity allowed to log in.
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    /// Read configuration from the environment.
    ///
    /// Missing secret/password fall back to insecure development defaults
    /// and log a warning. Production deployments must set `JWT_SECRET_KEY`
    /// and `API_PASSWORD` explicitly.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET_KEY not set; using insecure dev default");
            "default_secret".to_string()
        });

        let minutes = std::env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(30);

        let username = std::env::var("API_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password = std::env::var("API_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("API_PASSWORD not set; using insecure dev default");
            "secret123".to_string()
        });

        Self {
            secret,
            token_ttl: Duration::minutes(minutes),
            username,
            password,
        }
    }
}
