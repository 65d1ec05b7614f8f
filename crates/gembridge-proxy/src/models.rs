//! Response bodies owned by the HTTP surface.
//!
//! OpenAI-shaped completion and model types live in `gembridge-core`; this
//! module only holds the service-level documents.

use serde::{Deserialize, Serialize};

/// Version reported by the root document.
pub const API_VERSION: &str = "1.0.0";

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    /// Whether a Gemini client was configured at startup.
    pub gemini_initialized: bool,
    /// Unix seconds.
    pub timestamp: i64,
}

impl HealthResponse {
    pub fn healthy(gemini_initialized: bool, timestamp: i64) -> Self {
        Self {
            status: "healthy".to_string(),
            gemini_initialized,
            timestamp,
        }
    }
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoints {
    pub models: String,
    pub chat: String,
    pub health: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "Custom AI API - OpenAI Compatible API using Gemini Backend".to_string(),
            version: API_VERSION.to_string(),
            endpoints: Endpoints {
                models: "/v1/models".to_string(),
                chat: "/v1/chat/completions".to_string(),
                health: "/health".to_string(),
            },
        }
    }
}
