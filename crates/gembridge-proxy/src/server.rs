//! Axum HTTP server for the OpenAI-compatible surface.
//!
//! This module provides the router and the `serve()` function that runs it
//! on a pre-bound `TcpListener` until a cancellation token fires.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gembridge_core::{AccessGuard, CompletionEngine};

use crate::auth::require_access;
use crate::handlers;

/// Shared application state. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: Arc<CompletionEngine>,
    pub guard: AccessGuard,
}

impl AppState {
    pub fn new(engine: CompletionEngine, guard: AccessGuard) -> Self {
        Self {
            engine: Arc::new(engine),
            guard,
        }
    }
}

/// Cross-origin policy for browser clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// No CORS headers are emitted.
    #[default]
    Disabled,
    AllowAll,
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Build from a list of origins; `*` anywhere means allow all.
    pub fn from_origins(origins: Vec<String>) -> Self {
        if origins.is_empty() {
            Self::Disabled
        } else if origins.iter().any(|o| o == "*") {
            Self::AllowAll
        } else {
            Self::AllowOrigins(origins)
        }
    }
}

/// Listener and access settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token required on the completions route. `None` disables auth.
    pub access_secret: Option<String>,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            access_secret: None,
            cors: CorsConfig::Disabled,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn guard(&self) -> AccessGuard {
        AccessGuard::new(self.access_secret.clone())
    }
}

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    match config {
        CorsConfig::Disabled => None,
        CorsConfig::AllowAll => Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %o, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            Some(
                CorsLayer::new()
                    .allow_origin(allowed)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        }
    }
}

/// Create the application router.
///
/// Only `/v1/chat/completions` sits behind the access guard; models, health
/// and root stay public.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let completions = Router::new()
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access,
        ));

    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/v1/models", get(handlers::list_models))
        .route("/v1/models/{model_id}", get(handlers::get_model))
        .merge(completions)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match build_cors_layer(cors) {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

/// Start the server with a pre-bound listener.
///
/// Runs until the cancellation token is triggered.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    cors: CorsConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(
        %addr,
        gemini_initialized = state.engine.is_backend_ready(),
        auth_enabled = state.guard.is_enabled(),
        cors = ?cors,
        "gembridge server starting"
    );

    let app = create_router(state, &cors);

    info!("Configure OpenAI clients to use: http://{addr}/v1");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("gembridge server shut down");
    Ok(())
}
