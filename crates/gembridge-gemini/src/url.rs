//! URL construction for Gemini endpoints.

/// Normalize a model name to the bare id (`models/gemini-x` -> `gemini-x`).
fn model_id(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}

/// `{base}/models/{model}:generateContent`
pub(crate) fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model_id(model)
    )
}

/// `{base}/models/{model}:streamGenerateContent?alt=sse`
pub(crate) fn stream_generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:streamGenerateContent?alt=sse",
        base_url.trim_end_matches('/'),
        model_id(model)
    )
}
