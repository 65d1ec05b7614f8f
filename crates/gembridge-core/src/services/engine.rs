//! Completion engine - orchestrates registry, transcoder and backend.
//!
//! The engine owns the injected generation backend. When no backend was
//! configured every completion fails fast with a configuration error.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use tracing::{debug, info, warn};

use super::registry::ModelRegistry;
use super::tokens::estimate_tokens;
use super::transcoder::{self, DEFAULT_SYSTEM_PREAMBLE};
use crate::domain::{
    CompletionChoice, CompletionRequest, CompletionResponse, StreamChunk, StreamErrorPayload,
    Usage,
};
use crate::ports::{CoreError, FragmentStream, GenerationPort, GenerationRequest};

const BACKEND_NOT_INITIALIZED: &str = "Gemini client not initialized";

/// How response ids are derived from the creation timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// `chatcmpl-{created}`. Two responses created in the same second share an id.
    #[default]
    Timestamp,
    /// `chatcmpl-{created}-{8 hex chars}`.
    TimestampWithSuffix,
}

impl IdStrategy {
    /// Build a response id for a response created at `created`.
    pub fn make_id(self, created: i64) -> String {
        match self {
            Self::Timestamp => format!("chatcmpl-{created}"),
            Self::TimestampWithSuffix => {
                let suffix = uuid::Uuid::new_v4().simple().to_string();
                format!("chatcmpl-{created}-{}", &suffix[..8])
            }
        }
    }
}

/// Engine settings that do not depend on the backend.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Text placed ahead of every flattened conversation.
    pub system_preamble: String,
    pub id_strategy: IdStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            system_preamble: DEFAULT_SYSTEM_PREAMBLE.to_string(),
            id_strategy: IdStrategy::default(),
        }
    }
}

/// One item of a streamed completion, before transport framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Chunk(StreamChunk),
    /// Backend failure; always the last item of the stream.
    Error(StreamErrorPayload),
    /// End-of-stream sentinel after a successful closing chunk.
    Done,
}

/// Lazy sequence of stream events.
pub type EventStream = BoxStream<'static, StreamEvent>;

/// Orchestrates a chat completion against the generation backend.
pub struct CompletionEngine {
    backend: Option<Arc<dyn GenerationPort>>,
    registry: ModelRegistry,
    config: EngineConfig,
}

impl CompletionEngine {
    /// Create an engine. `backend` is `None` when no backend credential was configured.
    pub fn new(
        backend: Option<Arc<dyn GenerationPort>>,
        registry: ModelRegistry,
        config: EngineConfig,
    ) -> Self {
        Self {
            backend,
            registry,
            config,
        }
    }

    pub const fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Whether a backend client was injected.
    pub const fn is_backend_ready(&self) -> bool {
        self.backend.is_some()
    }

    /// Validate the request and build the backend request.
    ///
    /// Runs before any backend call so that invalid requests never reach it.
    fn prepare(
        &self,
        request: &CompletionRequest,
    ) -> Result<(Arc<dyn GenerationPort>, GenerationRequest), CoreError> {
        if request.messages.is_empty() {
            return Err(CoreError::validation(
                "messages",
                "at least one message is required",
            ));
        }

        let backend = self
            .backend
            .clone()
            .ok_or_else(|| CoreError::Configuration(BACKEND_NOT_INITIALIZED.to_string()))?;

        let backend_model = self.registry.resolve(&request.model);
        let prompt = transcoder::encode(&request.messages, &self.config.system_preamble);

        debug!(
            model = %request.model,
            backend_model = %backend_model,
            messages = request.messages.len(),
            prompt_chars = prompt.len(),
            "Prepared generation request"
        );

        let generation = GenerationRequest {
            model: backend_model.to_string(),
            prompt,
            temperature: request.temperature(),
            top_p: request.top_p(),
            max_tokens: request.max_tokens,
        };

        Ok((backend, generation))
    }

    /// Run a non-streaming completion.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CoreError> {
        let (backend, generation) = self.prepare(request)?;

        let text = backend.generate(&generation).await.map_err(|e| {
            warn!(model = %request.model, error = %e, "Backend generation failed");
            CoreError::Upstream(e)
        })?;
        let text = text.ok_or(CoreError::UpstreamEmptyResponse)?;

        let usage = Usage::new(estimate_tokens(&generation.prompt), estimate_tokens(&text));
        let created = Utc::now().timestamp();

        info!(
            model = %request.model,
            backend_model = %generation.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Chat completion finished"
        );

        Ok(CompletionResponse {
            id: self.config.id_strategy.make_id(created),
            object: "chat.completion".to_string(),
            created,
            model: request.model.clone(),
            choices: vec![CompletionChoice {
                index: 0,
                message: transcoder::decode(text),
                finish_reason: "stop".to_string(),
            }],
            usage,
        })
    }

    /// Start a streaming completion.
    ///
    /// Preconditions are checked eagerly. The backend stream itself is only
    /// opened when the returned stream is first polled, and each further
    /// backend read happens only when the consumer asks for the next event.
    pub fn complete_stream(&self, request: &CompletionRequest) -> Result<EventStream, CoreError> {
        let (backend, generation) = self.prepare(request)?;
        let created = Utc::now().timestamp();

        let state = StreamState {
            id: self.config.id_strategy.make_id(created),
            created,
            model: request.model.clone(),
            phase: Phase::Opening {
                backend,
                request: generation,
            },
            fragments: 0,
        };

        Ok(stream::unfold(state, next_event).boxed())
    }
}

impl fmt::Debug for CompletionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionEngine")
            .field("backend_ready", &self.is_backend_ready())
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

/// State threaded through the `unfold` stream.
struct StreamState {
    id: String,
    created: i64,
    model: String,
    phase: Phase,
    fragments: usize,
}

enum Phase {
    Opening {
        backend: Arc<dyn GenerationPort>,
        request: GenerationRequest,
    },
    Streaming(FragmentStream),
    Closing,
    Finished,
}

async fn next_event(mut st: StreamState) -> Option<(StreamEvent, StreamState)> {
    match std::mem::replace(&mut st.phase, Phase::Finished) {
        Phase::Opening { backend, request } => match backend.generate_stream(&request).await {
            Ok(fragments) => {
                st.phase = Phase::Streaming(fragments);
                let chunk = StreamChunk::role(&st.id, st.created, &st.model);
                Some((StreamEvent::Chunk(chunk), st))
            }
            Err(e) => {
                warn!(model = %st.model, error = %e, "Failed to open backend stream");
                Some((StreamEvent::Error(StreamErrorPayload::internal(e.to_string())), st))
            }
        },
        Phase::Streaming(mut fragments) => match fragments.next().await {
            Some(Ok(text)) => {
                st.fragments += 1;
                st.phase = Phase::Streaming(fragments);
                let chunk = StreamChunk::content(&st.id, st.created, &st.model, text);
                Some((StreamEvent::Chunk(chunk), st))
            }
            Some(Err(e)) => {
                warn!(
                    model = %st.model,
                    fragments = st.fragments,
                    error = %e,
                    "Backend stream failed"
                );
                Some((StreamEvent::Error(StreamErrorPayload::internal(e.to_string())), st))
            }
            None => {
                st.phase = Phase::Closing;
                let chunk = StreamChunk::stop(&st.id, st.created, &st.model);
                Some((StreamEvent::Chunk(chunk), st))
            }
        },
        Phase::Closing => {
            info!(model = %st.model, fragments = st.fragments, "Chat completion stream finished");
            Some((StreamEvent::Done, st))
        }
        Phase::Finished => None,
    }
}
