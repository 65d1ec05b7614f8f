//! Chat message and role types.

use serde::{Deserialize, Serialize};

/// The role of a chat message sender.
///
/// Clients may send roles this adapter has no prompt prefix for
/// (`tool`, `function`, `developer`...). Those are kept as
/// `Unrecognized` so the request still parses; the transcoder drops them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Unrecognized(String),
}

impl Role {
    /// Convert role to its wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Unrecognized(other) => other,
        }
    }

    /// Prefix used for this role in the flattened prompt, if any.
    #[must_use]
    pub const fn prompt_prefix(&self) -> Option<&'static str> {
        match self {
            Self::System => Some("System"),
            Self::User => Some("Human"),
            Self::Assistant => Some("Assistant"),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a message with the given role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
