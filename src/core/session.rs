//! Session-scoped conversation cache.
//!
//! An external collaborator, not dispatch logic: the hosting UI may persist
//! its message list between views under a fixed key. Anything unreadable on
//! load is discarded in favor of a fresh single-greeting conversation.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::core::message::ConversationMessage;

/// Fixed session-scoped key the conversation history lives under.
pub const HISTORY_KEY: &str = "chat.history";

/// Minimal string key-value store contract the cache writes through.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory store; lives exactly as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

pub struct SessionCache<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the cached conversation, or a fresh one seeded with the default
    /// greeting when the cache is absent, malformed, or empty.
    pub fn load(&self) -> Vec<ConversationMessage> {
        let Some(raw) = self.store.get(HISTORY_KEY) else {
            return Self::seed();
        };
        match serde_json::from_str::<Vec<ConversationMessage>>(&raw) {
            Ok(messages) if !messages.is_empty() => messages,
            Ok(_) => Self::seed(),
            Err(error) => {
                debug!("discarding malformed cached history ({})", error);
                Self::seed()
            }
        }
    }

    pub fn save(&self, messages: &[ConversationMessage]) -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(messages)?;
        self.store.set(HISTORY_KEY, encoded);
        Ok(())
    }

    pub fn clear(&self) {
        self.store.remove(HISTORY_KEY);
    }

    fn seed() -> Vec<ConversationMessage> {
        vec![ConversationMessage::default_greeting()]
    }
}
