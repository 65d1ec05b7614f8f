//! Gemini backend for gembridge.
//!
//! Implements [`gembridge_core::GenerationPort`] on top of the Gemini
//! `generateContent` and `streamGenerateContent` REST endpoints.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod models;
mod stream;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use client::GeminiClient;
pub use config::{DEFAULT_BASE_URL, GeminiClientConfig};
pub use error::{GeminiError, GeminiResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use wiremock as _;
