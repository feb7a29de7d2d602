//! `admitd-auth` — bearer-token authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it issues and
//! verifies self-describing HS256 tokens and decides, per request path,
//! whether verification is required at all. No session state is kept.

pub mod claims;
pub mod config;
pub mod gate;

pub use claims::Claims;
pub use config::AuthConfig;
pub use gate::{AuthError, AuthGate, PUBLIC_PATHS};
