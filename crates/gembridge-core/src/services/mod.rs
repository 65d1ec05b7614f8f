//! Core services - the adaptation logic.
//!
//! Services here orchestrate between the generation port and the domain
//! types. They never know which concrete backend sits behind the port.

mod engine;
mod guard;
mod registry;
mod tokens;
pub mod transcoder;

pub use engine::{CompletionEngine, EngineConfig, EventStream, IdStrategy, StreamEvent};
pub use guard::{AccessGuard, AuthError};
pub use registry::{DEFAULT_BACKEND_MODEL, ModelRegistry, PUBLIC_ALIASES};
pub use tokens::estimate_tokens;
pub use transcoder::DEFAULT_SYSTEM_PREAMBLE;
