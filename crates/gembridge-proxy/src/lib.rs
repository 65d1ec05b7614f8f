//! OpenAI-compatible HTTP surface for gembridge.
//!
//! Routes, request parsing, SSE framing, bearer-token middleware and the
//! mapping from core errors to HTTP responses. All completion logic lives in
//! [`gembridge_core::CompletionEngine`]; this crate only marshals.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

mod auth;
pub mod error;
mod handlers;
pub mod models;
pub mod server;
mod sse;

pub use error::{HttpError, LocSegment, ValidationIssue, parse_body};
pub use server::{AppState, CorsConfig, ServerConfig, create_router, serve};
