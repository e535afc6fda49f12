use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ChatMessage, Role};
use crate::core::config::{Config, ENV_API_BASE, ENV_FEATURE_FLAGS};
use crate::core::dispatch::{HttpRequest, HttpResponse, HttpTransport, TransportError};

pub fn test_config(api_base: &str) -> Config {
    let base = api_base.to_string();
    Config::from_lookup(|key| {
        if key == ENV_API_BASE && !base.is_empty() {
            Some(base.clone())
        } else {
            None
        }
    })
}

pub fn config_with_flags(flags: &str) -> Config {
    let flags = flags.to_string();
    Config::from_lookup(|key| {
        if key == ENV_FEATURE_FLAGS {
            Some(flags.clone())
        } else {
            None
        }
    })
}

/// Config whose feature flags opt into mock mode.
pub fn mock_mode_config() -> Config {
    config_with_flags(r#"{"mockApi": true}"#)
}

pub fn user_message(content: &str) -> ChatMessage {
    ChatMessage::new(Role::User, content)
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    }
}

/// Response with the given status and an empty non-JSON body.
pub fn status_response(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        content_type: None,
        body: String::new(),
    }
}

pub enum ScriptedOutcome {
    Respond(HttpResponse),
    Fail(TransportError),
    /// Never resolve; the caller's timeout has to fire.
    Hang,
}

/// Transport double that records every request and replays a script of
/// outcomes. An exhausted script hangs, which under a paused tokio clock
/// exercises the timeout path deterministically.
pub struct RecordingTransport {
    calls: Mutex<Vec<HttpRequest>>,
    script: Mutex<VecDeque<ScriptedOutcome>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
        }
    }

    pub fn then(self, outcome: ScriptedOutcome) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn respond(self, response: HttpResponse) -> Self {
        self.then(ScriptedOutcome::Respond(response))
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.then(ScriptedOutcome::Fail(error))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(request);
        let outcome = self.script.lock().unwrap().pop_front();
        match outcome {
            Some(ScriptedOutcome::Respond(response)) => Ok(response),
            Some(ScriptedOutcome::Fail(error)) => Err(error),
            Some(ScriptedOutcome::Hang) | None => std::future::pending().await,
        }
    }
}
