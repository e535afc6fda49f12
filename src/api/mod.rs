//! Chat wire payloads and backend reply interpretation.
//!
//! The backend contract is `POST {base}/chat` with a JSON body of
//! `{ "messages": [{role, content}, ...] }`. Success bodies are permissive;
//! [`reply_text`] tries the known reply shapes in priority order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown when a success body carries no recognized reply shape.
pub const PLACEHOLDER_REPLY: &str = "Thanks for your message! (This is a placeholder response.)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ReplyShape {
    reply: String,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoicesShape {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct ContentShape {
    content: String,
}

/// Extract the assistant reply from a success payload.
///
/// Shapes are tried in priority order: `{reply}`, then OpenAI-style
/// `{choices: [{message: {content}}]}` (first choice only), then `{content}`.
/// A payload matching none of them yields [`PLACEHOLDER_REPLY`].
pub fn reply_text(data: &Value) -> String {
    if let Ok(shape) = serde_json::from_value::<ReplyShape>(data.clone()) {
        return shape.reply;
    }
    if let Ok(shape) = serde_json::from_value::<ChoicesShape>(data.clone()) {
        if let Some(choice) = shape.choices.into_iter().next() {
            return choice.message.content;
        }
    }
    if let Ok(shape) = serde_json::from_value::<ContentShape>(data.clone()) {
        return shape.content;
    }
    PLACEHOLDER_REPLY.to_string()
}
