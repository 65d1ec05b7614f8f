//! Internal error types for Gemini operations.
//!
//! These errors are internal to `gembridge-gemini` and are mapped to the core
//! `BackendError` at the port boundary.

use gembridge_core::BackendError;
use thiserror::Error;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Errors related to Gemini API operations.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The API answered with a non-success status, or sent an error object.
    #[error("Gemini API error {status}: {message}")]
    Api {
        /// HTTP status code (or the `code` of an in-stream error object)
        status: u16,
        /// Message reported by the API
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<GeminiError> for BackendError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Api { status, message } => Self::Status { status, message },
            GeminiError::Network(e) => Self::Transport(e.to_string()),
            GeminiError::JsonParse(e) => Self::InvalidResponse(e.to_string()),
        }
    }
}
