//! Bearer-token middleware for the completions route.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::HttpError;
use crate::server::AppState;

/// Check `Authorization` against the configured access secret.
///
/// A header that is not valid UTF-8 is treated as malformed rather than absent.
pub(crate) async fn require_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let verdict = state.guard.authorize(
        req.headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or_default()),
    );

    match verdict {
        Ok(()) => Ok(next.run(req).await),
        Err(e) => {
            warn!(path = %req.uri().path(), reason = %e, "Unauthorized API request");
            Err(e.into())
        }
    }
}
