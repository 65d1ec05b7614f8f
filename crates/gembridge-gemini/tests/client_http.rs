//! HTTP-level tests for the Gemini client against a mock server.

use futures_util::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gembridge_core::{BackendError, GenerationPort, GenerationRequest};
use gembridge_gemini::{GeminiClient, GeminiClientConfig};

const MODEL: &str = "gemini-2.0-flash-exp";

fn client(server: &MockServer) -> GeminiClient {
    let config = GeminiClientConfig::new("test-key").with_base_url(format!("{}/v1beta", server.uri()));
    GeminiClient::new(config).unwrap()
}

fn request() -> GenerationRequest {
    GenerationRequest {
        model: MODEL.to_string(),
        prompt: "system\n\nHuman: hi\n\nAssistant: ".to_string(),
        temperature: 0.7,
        top_p: 1.0,
        max_tokens: Some(32),
    }
}

#[tokio::test]
async fn generate_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "system\n\nHuman: hi\n\nAssistant: "}]}],
            "generationConfig": {"maxOutputTokens": 32}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello there"}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server).generate(&request()).await.unwrap();
    assert_eq!(text.as_deref(), Some("Hello there"));
}

#[tokio::test]
async fn generate_without_candidates_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let text = client(&server).generate(&request()).await.unwrap();
    assert_eq!(text, None);
}

#[tokio::test]
async fn generate_maps_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate(&request()).await.unwrap_err();
    assert_eq!(
        err,
        BackendError::Status {
            status: 400,
            message: "API key not valid.".to_string()
        }
    );
}

#[tokio::test]
async fn generate_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).generate(&request()).await.unwrap_err();
    assert!(matches!(err, BackendError::InvalidResponse(_)));
}

#[tokio::test]
async fn generate_reports_unreachable_backend() {
    let server = MockServer::start().await;
    let unreachable = client(&server);
    drop(server);

    let err = unreachable.generate(&request()).await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)));
}

#[tokio::test]
async fn stream_yields_fragments_in_order() {
    let server = MockServer::start().await;
    let sse = concat!(
        "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"Hel\"}]}}]}\r\n\r\n",
        "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"lo\"}]},\"finishReason\":\"STOP\"}]}\r\n\r\n",
    );
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:streamGenerateContent")))
        .and(query_param("alt", "sse"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fragments: Vec<_> = client(&server)
        .generate_stream(&request())
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(fragments, vec![Ok("Hel".to_string()), Ok("lo".to_string())]);
}

#[tokio::test]
async fn stream_open_failure_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:streamGenerateContent")))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
        })))
        .mount(&server)
        .await;

    let result = client(&server).generate_stream(&request()).await;
    match result {
        Err(BackendError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "The model is overloaded.");
        }
        Err(other) => panic!("Unexpected error: {other:?}"),
        Ok(_) => panic!("Expected stream open to fail"),
    }
}
