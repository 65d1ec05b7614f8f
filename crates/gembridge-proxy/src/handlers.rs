//! Route handlers. Each one delegates to the engine or registry and maps
//! errors through [`HttpError`].

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info, warn};

use gembridge_core::{CompletionRequest, ModelInfo, ModelList};

use crate::error::{HttpError, parse_body};
use crate::models::{HealthResponse, RootResponse};
use crate::server::AppState;
use crate::sse::event_stream_response;

pub(crate) async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.engine.is_backend_ready(),
        Utc::now().timestamp(),
    ))
}

/// List every public alias in OpenAI format.
pub(crate) async fn list_models(State(state): State<AppState>) -> Json<ModelList> {
    debug!("GET /v1/models");
    Json(state.engine.registry().list())
}

pub(crate) async fn get_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<ModelInfo>, HttpError> {
    debug!(model = %model_id, "GET /v1/models/{{id}}");
    Ok(Json(state.engine.registry().model_info(&model_id)?))
}

/// Handle chat completions, dispatching on the `stream` flag.
///
/// The body is parsed here rather than through the `Json` extractor so that
/// schema violations produce the 422 `detail` list with the offending path.
pub(crate) async fn chat_completions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let request: CompletionRequest = parse_body(&body).inspect_err(|e| {
        warn!(error = ?e, "Failed to parse chat completion request");
    })?;

    info!(
        model = %request.model,
        streaming = request.is_streaming(),
        messages = request.messages.len(),
        "Processing chat completion request"
    );

    if request.is_streaming() {
        let events = state.engine.complete_stream(&request)?;
        Ok(event_stream_response(events))
    } else {
        let response = state.engine.complete(&request).await?;
        Ok(Json(response).into_response())
    }
}

pub(crate) async fn not_found() -> HttpError {
    HttpError::NotFound("Not Found".to_string())
}

pub(crate) async fn method_not_allowed() -> HttpError {
    HttpError::MethodNotAllowed("Method Not Allowed".to_string())
}
