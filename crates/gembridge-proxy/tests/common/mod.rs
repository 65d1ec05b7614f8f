//! Shared helpers for HTTP surface tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gembridge_core::{
    AccessGuard, BackendError, CompletionEngine, EngineConfig, FragmentStream, GenerationPort,
    GenerationRequest, ModelRegistry,
};
use gembridge_proxy::{AppState, CorsConfig, create_router};

/// Generation backend double with a call counter.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub text: Option<String>,
    pub fragments: Vec<Result<String, BackendError>>,
    pub open_error: Option<BackendError>,
    calls: AtomicUsize,
}

impl FakeBackend {
    pub fn replying(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn streaming(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| Ok((*f).to_string())).collect(),
            ..Self::default()
        }
    }

    pub fn failing(error: BackendError) -> Self {
        Self {
            open_error: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationPort for FakeBackend {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Option<String>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.open_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.text.clone()),
        }
    }

    async fn generate_stream(
        &self,
        _request: &GenerationRequest,
    ) -> Result<FragmentStream, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.open_error {
            Some(e) => Err(e.clone()),
            None => Ok(stream::iter(self.fragments.clone()).boxed()),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<FakeBackend>,
}

impl TestApp {
    pub fn new(backend: FakeBackend) -> Self {
        Self::build(Some(backend), None, &CorsConfig::Disabled)
    }

    pub fn with_secret(backend: FakeBackend, secret: &str) -> Self {
        Self::build(Some(backend), Some(secret), &CorsConfig::Disabled)
    }

    /// App without any backend client, as when no Gemini key is configured.
    pub fn unconfigured() -> Self {
        Self::build(None, None, &CorsConfig::Disabled)
    }

    pub fn build(backend: Option<FakeBackend>, secret: Option<&str>, cors: &CorsConfig) -> Self {
        let injected = backend.is_some();
        let backend = Arc::new(backend.unwrap_or_default());
        let port = injected.then(|| Arc::clone(&backend) as Arc<dyn GenerationPort>);

        let engine = CompletionEngine::new(
            port,
            ModelRegistry::default(),
            EngineConfig::default(),
        );
        let state = AppState::new(engine, AccessGuard::new(secret.map(str::to_string)));

        Self {
            router: create_router(state, cors),
            backend,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, _, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn post_chat(
        &self,
        body: &serde_json::Value,
        auth: Option<&str>,
    ) -> (StatusCode, HeaderMap, Bytes) {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/v1/chat/completions")
            .header("content-type", "application/json");
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

/// Split an SSE body into its `data:` payloads.
pub fn sse_payloads(body: &[u8]) -> Vec<String> {
    std::str::from_utf8(body)
        .unwrap()
        .split("\n\n")
        .filter(|frame| !frame.is_empty())
        .map(|frame| frame.strip_prefix("data: ").unwrap().to_string())
        .collect()
}
