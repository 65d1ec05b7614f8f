//! SSE decoding for `streamGenerateContent?alt=sse`.
//!
//! Each `data:` line carries a full `GenerateContentResponse` JSON object.
//! Text is extracted per event; events without text are skipped.

use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, BoxStream};
use futures_util::{Stream, StreamExt};
use tracing::{trace, warn};

use gembridge_core::{BackendError, FragmentStream};

use crate::error::GeminiError;
use crate::models::GenerateContentResponse;

/// State threaded through the `unfold` stream.
struct SseState {
    stream: BoxStream<'static, Result<Bytes, reqwest::Error>>,
    buf: BytesMut,
    /// Upstream body fully read.
    eof: bool,
    /// A terminal item was already yielded.
    done: bool,
}

/// Convert a Gemini SSE byte stream into a stream of text fragments.
///
/// The stream ends after the first error item.
pub(crate) fn sse_fragments<S>(byte_stream: S) -> FragmentStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    let state = SseState {
        stream: byte_stream.boxed(),
        buf: BytesMut::new(),
        eof: false,
        done: false,
    };

    stream::unfold(state, |mut st| async move {
        if st.done {
            return None;
        }

        loop {
            let line = if let Some(line_end) = find_newline(&st.buf) {
                st.buf.split_to(line_end)
            } else if st.eof {
                // Trailing line without a newline terminator.
                if st.buf.is_empty() {
                    return None;
                }
                st.buf.split()
            } else {
                match st.stream.next().await {
                    Some(Ok(chunk)) => st.buf.extend_from_slice(&chunk),
                    Some(Err(e)) => {
                        warn!("Gemini stream error: {e}");
                        st.done = true;
                        return Some((Err(BackendError::from(GeminiError::from(e))), st));
                    }
                    None => st.eof = true,
                }
                continue;
            };

            let line_str = String::from_utf8_lossy(&line);
            match parse_line(line_str.trim()) {
                Some(Ok(text)) => return Some((Ok(text), st)),
                Some(Err(e)) => {
                    st.done = true;
                    return Some((Err(e), st));
                }
                None => {}
            }
        }
    })
    .boxed()
}

/// Decode one SSE line. `None` means the line carries nothing to forward.
fn parse_line(line: &str) -> Option<Result<String, BackendError>> {
    // Blank separators, comments and non-data fields.
    let data = line.strip_prefix("data:")?.trim();
    if data.is_empty() || data == "[DONE]" {
        return None;
    }

    let event = match serde_json::from_str::<GenerateContentResponse>(data) {
        Ok(event) => event,
        Err(e) => {
            warn!("Malformed Gemini stream event: {e}");
            return Some(Err(GeminiError::from(e).into()));
        }
    };

    if let Some(error) = event.error {
        return Some(Err(GeminiError::Api {
            status: error.code.unwrap_or(500),
            message: error.message,
        }
        .into()));
    }

    match event.text() {
        Some(text) if !text.is_empty() => Some(Ok(text)),
        _ => {
            trace!("Skipping Gemini stream event without text");
            None
        }
    }
}

/// Find the next newline in the buffer, returning the position after it.
fn find_newline(buf: &BytesMut) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n').map(|pos| pos + 1)
}
