//! The server runs on a pre-bound listener and stops on cancellation.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

use gembridge_core::{AccessGuard, CompletionEngine, EngineConfig, ModelRegistry};
use gembridge_proxy::{AppState, CorsConfig, serve};

#[tokio::test]
async fn serves_until_cancelled() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let engine = CompletionEngine::new(None, ModelRegistry::default(), EngineConfig::default());
    let state = AppState::new(engine, AccessGuard::disabled());
    let cancel = CancellationToken::new();
    let server = tokio::spawn(serve(listener, state, CorsConfig::Disabled, cancel.clone()));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("\"gemini_initialized\":false"));

    cancel.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}
