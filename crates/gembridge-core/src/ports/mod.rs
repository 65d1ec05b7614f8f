//! Port definitions (trait abstractions) for external systems.
//!
//! The only external system the core talks to is the generation backend.
//! Adapters map `CoreError` to their own representation (HTTP status codes,
//! CLI exit codes).

pub mod generation;

use thiserror::Error;

pub use generation::{BackendError, FragmentStream, GenerationPort, GenerationRequest};

/// Core error type for the adaptation layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Model info was requested for an id that is not an enumerated alias.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// The request is well-formed JSON but semantically invalid.
    #[error("Validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The backend client was never configured.
    #[error("{0}")]
    Configuration(String),

    /// The backend answered but produced no usable text.
    #[error("No response from Gemini")]
    UpstreamEmptyResponse,

    /// The backend call failed.
    #[error(transparent)]
    Upstream(#[from] BackendError),
}

impl CoreError {
    /// Create a validation error for a request field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
