//! HTTP error type and mappings from core errors.
//!
//! Every error body uses the `{"detail": ...}` envelope: a plain message for
//! most failures, a list of [`ValidationIssue`]s for 422 responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_path_to_error::Segment;
use thiserror::Error;
use tracing::{error, warn};

use gembridge_core::{AuthError, CoreError};

/// HTTP-facing error.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Access guard rejected the request.
    #[error("{0}")]
    Unauthorized(#[from] AuthError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    /// Request body failed to parse or validate.
    #[error("Request validation failed")]
    Unprocessable(Vec<ValidationIssue>),

    #[error("{0}")]
    Internal(String),
}

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path to the offending value, starting with `"body"`.
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One step of a [`ValidationIssue::loc`] path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl ValidationIssue {
    fn new(loc: Vec<LocSegment>, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// `["body", ...path]` for a deserialization path.
fn body_loc(path: &serde_path_to_error::Path) -> Vec<LocSegment> {
    let mut loc = vec![LocSegment::from("body")];
    for segment in path {
        match segment {
            Segment::Seq { index } => loc.push(LocSegment::Index(*index)),
            Segment::Map { key } => loc.push(LocSegment::Key(key.clone())),
            Segment::Enum { variant } => loc.push(LocSegment::Key(variant.clone())),
            Segment::Unknown => {}
        }
    }
    loc
}

#[derive(Serialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: Detail,
}

impl HttpError {
    /// Build a 422 from a request body deserialization failure.
    ///
    /// `loc` follows the JSON path to the offending value; a missing field is
    /// reported at the path where it should have been.
    pub fn invalid_body(err: &serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::unprocessable_json(body_loc(err.path()), err.inner())
    }

    fn unprocessable_json(mut loc: Vec<LocSegment>, err: &serde_json::Error) -> Self {
        let rendered = err.to_string();
        let message = strip_location(&rendered);

        let issue = match err.classify() {
            Category::Data => match missing_field(message) {
                Some(field) => {
                    loc.push(LocSegment::from(field));
                    ValidationIssue::new(loc, "Field required", "missing")
                }
                None => ValidationIssue::new(loc, message, "value_error"),
            },
            Category::Syntax | Category::Eof | Category::Io => ValidationIssue::new(
                vec![LocSegment::from("body")],
                format!("JSON decode error: {message}"),
                "json_invalid",
            ),
        };

        Self::Unprocessable(vec![issue])
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let is_auth = matches!(self, Self::Unauthorized(_));

        let detail = match self {
            Self::Unprocessable(issues) => Detail::Issues(issues),
            Self::Internal(msg) => {
                error!(status = status.as_u16(), "{msg}");
                Detail::Message(msg)
            }
            other => Detail::Message(other.to_string()),
        };

        let mut response = (status, Json(ErrorBody { detail })).into_response();
        if is_auth {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Deserialize a JSON request body, tracking the path to any offending value.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, HttpError> {
    let mut de = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| HttpError::invalid_body(&e))?;
    de.end()
        .map_err(|e| HttpError::unprocessable_json(vec![LocSegment::from("body")], &e))?;
    Ok(value)
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ModelNotFound(id) => {
                warn!(model = %id, "Model not found");
                Self::NotFound("Model not found".to_string())
            }
            CoreError::Validation { field, message } => {
                Self::Unprocessable(vec![ValidationIssue::new(
                    vec![LocSegment::from("body"), LocSegment::Key(field)],
                    message,
                    "value_error",
                )])
            }
            CoreError::Configuration(msg) => Self::Internal(msg),
            err @ (CoreError::UpstreamEmptyResponse | CoreError::Upstream(_)) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

/// Drop serde_json's ` at line L column C` suffix.
fn strip_location(message: &str) -> &str {
    message
        .rfind(" at line ")
        .map_or(message, |idx| &message[..idx])
}

/// Extract `name` from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")?
        .split('`')
        .next()
}
