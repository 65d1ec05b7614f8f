//! Bearer-token access guard for the completions endpoint.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Reasons a request is refused by the access guard.
///
/// All variants are surfaced with the same HTTP status.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("API key required")]
    MissingCredential,

    #[error("Invalid authorization format")]
    MalformedCredential,

    #[error("Invalid API key")]
    InvalidCredential,
}

/// Validates an optional `Authorization` header against a configured secret.
///
/// With no secret configured every request is permitted.
#[derive(Clone, Default)]
pub struct AccessGuard {
    secret: Option<Arc<str>>,
}

impl AccessGuard {
    /// Create a guard. An empty secret is treated as no secret.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
        }
    }

    /// A guard that permits everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    pub const fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Check the raw `Authorization` header value.
    pub fn authorize(&self, auth_header: Option<&str>) -> Result<(), AuthError> {
        let Some(secret) = self.secret.as_deref() else {
            return Ok(());
        };

        let header = auth_header.ok_or(AuthError::MissingCredential)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::MalformedCredential)?;

        if token == secret {
            Ok(())
        } else {
            Err(AuthError::InvalidCredential)
        }
    }
}

impl fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGuard")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
