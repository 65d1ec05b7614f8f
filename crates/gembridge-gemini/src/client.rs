//! Gemini HTTP client implementing the generation port.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

use gembridge_core::{BackendError, FragmentStream, GenerationPort, GenerationRequest};

use crate::config::GeminiClientConfig;
use crate::error::{GeminiError, GeminiResult};
use crate::models::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, error_message};
use crate::stream::sse_fragments;
use crate::url::{generate_content_url, stream_generate_content_url};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    /// Create a client from the given configuration.
    pub fn new(config: GeminiClientConfig) -> GeminiResult<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub const fn config(&self) -> &GeminiClientConfig {
        &self.config
    }

    fn body(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest::from_prompt(
            &request.prompt,
            GenerationConfig {
                temperature: Some(request.temperature),
                top_p: Some(request.top_p),
                max_output_tokens: request.max_tokens,
            },
        )
    }

    /// POST a request body, turning non-success statuses into API errors.
    async fn post(&self, url: &str, body: &GenerateContentRequest) -> GeminiResult<Response> {
        debug!(url = %url, "Calling Gemini");

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text);
        warn!(status = status.as_u16(), message = %message, "Gemini request failed");
        Err(GeminiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn generate_content(&self, request: &GenerationRequest) -> GeminiResult<Option<String>> {
        let url = generate_content_url(&self.config.base_url, &request.model);
        let response = self.post(&url, &Self::body(request)).await?;

        let bytes = response.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl GenerationPort for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, BackendError> {
        Ok(self.generate_content(request).await?)
    }

    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<FragmentStream, BackendError> {
        let url = stream_generate_content_url(&self.config.base_url, &request.model);
        let response = self.post(&url, &Self::body(request)).await?;
        Ok(sse_fragments(response.bytes_stream()))
    }
}
