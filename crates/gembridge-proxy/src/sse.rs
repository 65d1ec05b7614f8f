//! SSE framing for streamed completions.
//!
//! Each [`StreamEvent`] becomes one `data: <json>\n\n` frame; the end of a
//! successful stream is `data: [DONE]\n\n`.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::StreamExt;
use serde::Serialize;
use tracing::warn;

use gembridge_core::{EventStream, StreamEvent};

const DONE_FRAME: &[u8] = b"data: [DONE]\n\n";

/// Wrap an engine event stream into a `text/event-stream` response.
///
/// The body is pulled lazily by hyper; dropping it (client disconnect)
/// drops the engine stream and the backend connection with it.
pub(crate) fn event_stream_response(events: EventStream) -> Response {
    let frames = events.map(|event| Ok::<_, Infallible>(frame(&event)));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header("x-accel-buffering", "no")
        .body(Body::from_stream(frames))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Encode one event as an SSE frame.
pub(crate) fn frame(event: &StreamEvent) -> Bytes {
    match event {
        StreamEvent::Chunk(chunk) => data_frame(chunk),
        StreamEvent::Error(payload) => data_frame(payload),
        StreamEvent::Done => Bytes::from_static(DONE_FRAME),
    }
}

fn data_frame<T: Serialize>(value: &T) -> Bytes {
    match serde_json::to_string(value) {
        Ok(json) => Bytes::from(format!("data: {json}\n\n")),
        Err(e) => {
            warn!("Failed to serialize stream event: {e}");
            Bytes::new()
        }
    }
}
