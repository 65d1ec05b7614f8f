//! Core of the gembridge OpenAI-compatible adapter.
//!
//! Holds the OpenAI-shaped domain types, the generation port the backend
//! client implements, and the services that translate between the two.
//! Nothing in here knows about HTTP servers or a concrete backend.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ChatMessage, ChunkChoice, ChunkDelta, CompletionChoice, CompletionRequest, CompletionResponse,
    ModelInfo, ModelList, Role, StreamChunk, StreamErrorPayload, Usage,
};
pub use ports::{BackendError, CoreError, FragmentStream, GenerationPort, GenerationRequest};
pub use services::{
    AccessGuard, AuthError, CompletionEngine, DEFAULT_BACKEND_MODEL, DEFAULT_SYSTEM_PREAMBLE,
    EngineConfig, EventStream, IdStrategy, ModelRegistry, PUBLIC_ALIASES, StreamEvent,
    estimate_tokens,
};
