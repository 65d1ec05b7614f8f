//! Generation port for the text-completion backend.
//!
//! The completion engine only sees this trait; the production Gemini client
//! and the test doubles both implement it. Implementations must be safe to
//! share across concurrent requests without locking.

use std::fmt;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use thiserror::Error;

/// Backend-neutral generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Resolved backend model id.
    pub model: String,
    /// Flattened prompt produced by the transcoder.
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: Option<u32>,
}

/// Errors reported by a generation backend.
///
/// No variant is retried by the core; the message is surfaced to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Network or transport failure before a response was read.
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend payload could not be interpreted.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Incremental text fragments of a streaming generation.
pub type FragmentStream = BoxStream<'static, Result<String, BackendError>>;

/// Port for invoking the generation backend.
#[async_trait]
pub trait GenerationPort: Send + Sync + fmt::Debug {
    /// Run one generation and return its output text.
    ///
    /// Returns `Ok(None)` when the backend answered without any usable text
    /// (no candidates, blocked prompt, non-text parts only).
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, BackendError>;

    /// Start a streaming generation.
    ///
    /// The outer result reports failures that happen before the first
    /// fragment; the stream items report failures after that.
    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<FragmentStream, BackendError>;
}
