//! Deterministic local responder for chat-shaped requests.
//!
//! No network I/O: replies are derived from the latest user message through
//! ordered classification rules, behind a simulated latency so callers
//! exercise the same suspension points as the real path.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::api::{ChatMessage, Role};
use crate::core::config::Config;
use crate::core::dispatch::{DispatchError, DispatchResult};

/// Simulated latency for a mocked chat reply.
pub const MOCK_LATENCY: Duration = Duration::from_millis(600);

/// Model literal stamped on every mocked chat reply.
pub const MOCK_MODEL: &str = "mock-local-v1";

const EMPTY_CONVERSATION_REPLY: &str =
    "Hello! I'm your local mock assistant. Ask me anything.";
const GREETING_REPLY: &str =
    "Hey there! \u{1f44b} I'm a mock assistant responding locally. How can I help?";
const HELP_REPLY: &str = "Sure! While I'm a mock, I can still outline steps: 1) Clarify your goal, 2) Gather inputs, 3) Execute, 4) Iterate.";
const JOKE_REPLY: &str = "Here's a mock joke: Why did the function break up with the loop? It needed some space (complexity)!";

const ECHO_PREVIEW_LIMIT: usize = 140;

pub struct MockResponder {
    latency: Duration,
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockResponder {
    pub fn new() -> Self {
        Self::with_latency(MOCK_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Whether the feature flags opt this process into mock mode.
    ///
    /// Two-tier parse, intentionally lenient: a JSON object with
    /// `"mockApi": true` wins; when the raw string is not valid JSON, a
    /// case-insensitive word-bounded `mockapi` token anywhere in it counts
    /// (which also covers `mockapi=true`). The token match can false-positive
    /// on unrelated text that happens to contain it; callers depend on the
    /// loose behavior, so it stays.
    pub fn is_enabled(config: &Config) -> bool {
        let raw = config.feature_flags.as_str();
        match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => parsed.get("mockApi").and_then(Value::as_bool) == Some(true),
            Err(_) => contains_token(&raw.to_lowercase(), "mockapi"),
        }
    }

    /// Simulated POST. Supports the chat path; anything else is a
    /// structured 404 after half the base latency.
    pub async fn post(&self, path: &str, body: &Value) -> DispatchResult {
        if path == "/chat" || path == "chat" {
            return self.chat(body).await;
        }

        tokio::time::sleep(self.latency / 2).await;
        DispatchResult::failed(
            404,
            DispatchError {
                message: format!("Mock endpoint not implemented for {}", path),
                status: None,
                code: Some("MOCK_NOT_IMPLEMENTED".to_string()),
                payload: None,
            },
        )
    }

    /// Simulated GET. Recognizes the health path; anything else is a
    /// structured 404.
    pub async fn get(&self, path: &str) -> DispatchResult {
        tokio::time::sleep(self.latency / 3).await;
        if path == "/health" || path == "health" {
            return DispatchResult::ok(json!({"ok": true, "mock": true}), 200);
        }
        DispatchResult::failed(
            404,
            DispatchError {
                message: format!("Mock GET not implemented for {}", path),
                status: None,
                code: None,
                payload: None,
            },
        )
    }

    async fn chat(&self, body: &Value) -> DispatchResult {
        tokio::time::sleep(self.latency).await;
        let messages = body
            .get("messages")
            .cloned()
            .map(|value| serde_json::from_value::<Vec<ChatMessage>>(value).unwrap_or_default())
            .unwrap_or_default();
        let reply = build_assistant_reply(&messages);
        debug!("mock chat reply generated ({} chars)", reply.len());
        DispatchResult::ok(
            json!({"reply": reply, "model": MOCK_MODEL, "mock": true}),
            200,
        )
    }
}

/// Derive an assistant-like reply from the latest user message. Rule order
/// is significant: greeting, then help, then joke, then echo.
fn build_assistant_reply(messages: &[ChatMessage]) -> String {
    let base = messages
        .iter()
        .rev()
        .find(|message| message.role == Role::User)
        .map(|message| message.content.trim())
        .filter(|content| !content.is_empty());

    let base = match base {
        Some(content) => content,
        None => return EMPTY_CONVERSATION_REPLY.to_string(),
    };

    let lowered = base.to_lowercase();
    if ["hello", "hi", "hey"].iter().any(|t| lowered.contains(t)) {
        return GREETING_REPLY.to_string();
    }
    if lowered.contains("help") || lowered.contains("how to") {
        return HELP_REPLY.to_string();
    }
    if lowered.contains("joke") || lowered.contains("funny") {
        return JOKE_REPLY.to_string();
    }

    let preview = if base.chars().count() > ECHO_PREVIEW_LIMIT {
        let truncated: String = base.chars().take(ECHO_PREVIEW_LIMIT).collect();
        format!("{}...", truncated)
    } else {
        base.to_string()
    };
    format!(
        "You said: \"{}\"\n\n(Mocked reply generated locally with slight latency.)",
        preview
    )
}

/// Word-bounded substring search (ASCII word characters, like `\b`).
fn contains_token(haystack: &str, token: &str) -> bool {
    let bytes = haystack.as_bytes();
    let mut start = 0;
    while let Some(offset) = haystack[start..].find(token) {
        let begin = start + offset;
        let end = begin + token.len();
        let bounded_before = begin == 0 || !is_word_byte(bytes[begin - 1]);
        let bounded_after = end == bytes.len() || !is_word_byte(bytes[end]);
        if bounded_before && bounded_after {
            return true;
        }
        start = begin + 1;
    }
    false
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
