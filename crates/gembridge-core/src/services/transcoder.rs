//! Message transcoding between chat turns and the backend's flat prompt.
//!
//! The backend is driven as a plain text-completion model, so turn
//! boundaries only exist as the `Role: content` line convention below.
//! The layout of the prompt must stay exactly as produced here.

use crate::domain::ChatMessage;

/// Preamble placed ahead of every conversation unless configured otherwise.
pub const DEFAULT_SYSTEM_PREAMBLE: &str =
    "你是一个有用的AI助手。请用自然、友好的语调回答用户的问题。";

/// Cue appended so the backend continues the assistant turn.
const ASSISTANT_CUE: &str = "Assistant: ";

/// Flatten `messages` into a single prompt string.
///
/// Layout: `{preamble}\n\n{line}\n{line}...\n\nAssistant: ` where each line is
/// `{Prefix}: {content}`. Messages with an unrecognized role are skipped.
pub fn encode(messages: &[ChatMessage], system_preamble: &str) -> String {
    let conversation = messages
        .iter()
        .filter_map(|message| {
            message
                .role
                .prompt_prefix()
                .map(|prefix| format!("{prefix}: {}", message.content))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{system_preamble}\n\n{conversation}\n\n{ASSISTANT_CUE}")
}

/// Wrap raw backend output as an assistant message, verbatim.
pub fn decode(backend_text: impl Into<String>) -> ChatMessage {
    ChatMessage::assistant(backend_text)
}
