use serde::{Deserialize, Serialize};

use crate::api::{ChatMessage, Role};

/// Seed assistant message shown before any user input.
pub const DEFAULT_GREETING: &str = "Hello! I am your AI assistant. How can I help you today?";

/// A message as the hosting UI owns it: append-only ordering, ids unique
/// within one conversation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Set when the message represents a delivery failure notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
}

impl ConversationMessage {
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            error: None,
        }
    }

    /// The fixed greeting a fresh conversation starts with.
    pub fn default_greeting() -> Self {
        Self::new("m1", Role::Assistant, DEFAULT_GREETING)
    }

    /// Project onto the wire shape (role + content only).
    pub fn to_wire(&self) -> ChatMessage {
        ChatMessage::new(self.role, self.content.clone())
    }
}
