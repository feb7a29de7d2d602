//! Bearer token claims model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a bearer token.
///
/// Timestamps are serialized as Unix seconds so `exp` is validated natively
/// by the JWT layer. Tokens are fully self-describing: any unexpired,
/// correctly signed token is accepted regardless of which login produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / authenticated identity.
    pub sub: String,

    /// Issued-at timestamp.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}
