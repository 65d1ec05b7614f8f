//! Public configuration for the Gemini client.

use std::fmt;
use std::time::Duration;

/// Default Gemini REST API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini client.
///
/// # Example
///
/// ```
/// use gembridge_gemini::GeminiClientConfig;
///
/// let config = GeminiClientConfig::new("my-key")
///     .with_base_url("http://localhost:9999/v1beta")
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Clone)]
pub struct GeminiClientConfig {
    /// API key sent as `x-goog-api-key`
    pub(crate) api_key: String,
    /// Base URL up to and including the API version segment
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Optional whole-request timeout. `None` leaves the call unbounded.
    pub(crate) timeout: Option<Duration>,
}

impl GeminiClientConfig {
    /// Create a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("gembridge/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }

    /// Set the base URL for the Gemini API.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Bound every backend request by `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for GeminiClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiClientConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("gembridge/"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeminiClientConfig::new("key")
            .with_base_url("http://127.0.0.1:1234/v1beta")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url(), "http://127.0.0.1:1234/v1beta");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", GeminiClientConfig::new("super-secret-key"));
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
