//! Chat completion request/response types.
//!
//! These match the `OpenAI` `/v1/chat/completions` schema closely enough for
//! existing SDKs to talk to the adapter unchanged.

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;

/// Model assumed when the client omits `model`.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 1.0;

// =============================================================================
// Request
// =============================================================================

/// Request body of `/v1/chat/completions`.
///
/// Optional sampling fields accept an explicit `null`, which means "use the
/// default". Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionRequest {
    /// Public model name requested by the client.
    #[serde(default = "default_model")]
    pub model: String,
    /// Conversation so far. Must not be empty.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Whether to stream the response as SSE chunks.
    #[serde(default)]
    pub stream: Option<bool>,
    /// Nucleus sampling parameter.
    #[serde(default = "default_top_p")]
    pub top_p: Option<f32>,
    /// Accepted for compatibility, not forwarded.
    #[serde(default = "default_penalty")]
    pub frequency_penalty: Option<f32>,
    /// Accepted for compatibility, not forwarded.
    #[serde(default = "default_penalty")]
    pub presence_penalty: Option<f32>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[allow(clippy::unnecessary_wraps)]
const fn default_temperature() -> Option<f32> {
    Some(DEFAULT_TEMPERATURE)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_top_p() -> Option<f32> {
    Some(DEFAULT_TOP_P)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_penalty() -> Option<f32> {
    Some(0.0)
}

impl CompletionRequest {
    /// Build a non-streaming request with default sampling parameters.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: default_temperature(),
            max_tokens: None,
            stream: None,
            top_p: default_top_p(),
            frequency_penalty: default_penalty(),
            presence_penalty: default_penalty(),
        }
    }

    /// Mark the request as streaming.
    #[must_use]
    pub const fn streaming(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.stream.unwrap_or(false)
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    #[must_use]
    pub fn top_p(&self) -> f32 {
        self.top_p.unwrap_or(DEFAULT_TOP_P)
    }
}

// =============================================================================
// Non-streaming response
// =============================================================================

/// Token usage statistics. Estimated, never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    /// Build usage from prompt and completion counts.
    #[must_use]
    pub const fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// A single chat completion choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

/// Response from `/v1/chat/completions` (non-streaming).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    /// Echoes the requested model, not the backend model.
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,
}

// =============================================================================
// Streaming response
// =============================================================================

/// Delta content in a streaming chunk. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A single streaming choice. `finish_reason` serializes as `null` until the
/// closing chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

/// One `chat.completion.chunk` of a streamed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

impl StreamChunk {
    fn single(id: &str, created: i64, model: &str, delta: ChunkDelta, finish: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            object: "chat.completion.chunk".to_string(),
            created,
            model: model.to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason: finish.map(str::to_string),
            }],
        }
    }

    /// Opening chunk carrying only the assistant role marker.
    #[must_use]
    pub fn role(id: &str, created: i64, model: &str) -> Self {
        let delta = ChunkDelta {
            role: Some("assistant".to_string()),
            content: None,
        };
        Self::single(id, created, model, delta, None)
    }

    /// Chunk carrying one content fragment.
    #[must_use]
    pub fn content(id: &str, created: i64, model: &str, fragment: impl Into<String>) -> Self {
        let delta = ChunkDelta {
            role: None,
            content: Some(fragment.into()),
        };
        Self::single(id, created, model, delta, None)
    }

    /// Closing chunk with an empty delta and `finish_reason: "stop"`.
    #[must_use]
    pub fn stop(id: &str, created: i64, model: &str) -> Self {
        Self::single(id, created, model, ChunkDelta::default(), Some("stop"))
    }
}

/// Error payload emitted in place of a chunk when the backend fails mid-stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamErrorPayload {
    pub error: StreamErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

impl StreamErrorPayload {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: StreamErrorBody {
                message: message.into(),
                error_type: "internal_error".to_string(),
            },
        }
    }
}
