//! Domain types for the OpenAI chat-completions wire shape.
//!
//! Every type here is request-scoped: built when a request arrives and
//! dropped once the response (or stream) is done.

mod chat;
mod completion;
mod model;

pub use chat::{ChatMessage, Role};
pub use completion::{
    ChunkChoice, ChunkDelta, CompletionChoice, CompletionRequest, CompletionResponse,
    DEFAULT_MODEL, StreamChunk, StreamErrorBody, StreamErrorPayload, Usage,
};
pub use model::{ModelInfo, ModelList, OWNED_BY};
