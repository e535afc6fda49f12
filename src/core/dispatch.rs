//! Request dispatch with transparent mock fallback.
//!
//! Every call runs the same decision: serve locally when mock mode is on,
//! probe backend health, and only then touch the network. Failures of any
//! kind terminate in a structured [`DispatchResult`]; nothing escapes this
//! boundary as an `Err` or a panic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{ChatMessage, ChatRequest};
use crate::core::config::Config;
use crate::core::health;
use crate::core::mock::MockResponder;
use crate::utils::url::build_url;

/// Cancellation budget for a real request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
        }
    }

    pub fn head(url: String) -> Self {
        Self {
            method: Method::Head,
            url,
            body: None,
        }
    }

    pub fn post(url: String, body: Value) -> Self {
        Self {
            method: Method::Post,
            url,
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// A failure that occurred before a valid HTTP response was obtained.
/// Distinct from an HTTP error status, which reaches the caller verbatim.
#[derive(Debug, Clone)]
pub enum TransportError {
    Timeout,
    Network(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Network(message) => write!(f, "{}", message),
        }
    }
}

impl TransportError {
    fn code(&self) -> &'static str {
        match self {
            TransportError::Timeout => "TIMEOUT",
            TransportError::Network(_) => "NETWORK",
        }
    }
}

/// Raw request execution, separated from dispatch policy so tests can
/// substitute a scripted double.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Head => self.client.head(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        let builder = builder.header("Content-Type", "application/json");
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Race a request against a cancellation timer. A fired timer manifests as
/// [`TransportError::Timeout`], never a hang.
pub(crate) async fn execute_with_timeout(
    transport: &dyn HttpTransport,
    request: HttpRequest,
    timeout: Duration,
) -> Result<HttpResponse, TransportError> {
    let cancel = CancellationToken::new();
    let timer = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        timer.cancel();
    });

    tokio::select! {
        outcome = transport.execute(request) => outcome,
        _ = cancel.cancelled() => Err(TransportError::Timeout),
    }
}

#[derive(Debug, Clone)]
pub struct DispatchError {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
    pub payload: Option<Value>,
}

/// Outcome of a single dispatch. `error == None` implies a 2xx status and a
/// present payload; transport-level failures carry status 0 with only the
/// error populated.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub data: Option<Value>,
    pub error: Option<DispatchError>,
    pub status: u16,
    /// Set when the mock stood in for a backend that should have answered.
    pub fallback_used: bool,
}

impl DispatchResult {
    pub fn ok(data: Value, status: u16) -> Self {
        Self {
            data: Some(data),
            error: None,
            status,
            fallback_used: false,
        }
    }

    pub fn failed(status: u16, error: DispatchError) -> Self {
        Self {
            data: None,
            error: Some(error),
            status,
            fallback_used: false,
        }
    }

    pub fn from_transport_error(error: &TransportError) -> Self {
        Self::failed(
            0,
            DispatchError {
                message: error.to_string(),
                status: None,
                code: Some(error.code().to_string()),
                payload: None,
            },
        )
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    fn into_fallback(mut self) -> Self {
        self.fallback_used = true;
        self
    }
}

fn interpret_body(content_type: Option<&str>, body: &str) -> Value {
    let declared_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(error) => {
            if declared_json {
                debug!("declared-JSON body failed to parse ({}); keeping raw text", error);
            }
            Value::String(body.to_string())
        }
    }
}

fn interpret_response(response: HttpResponse) -> DispatchResult {
    let payload = interpret_body(response.content_type.as_deref(), &response.body);
    if (200..300).contains(&response.status) {
        DispatchResult::ok(payload, response.status)
    } else {
        DispatchResult::failed(
            response.status,
            DispatchError {
                message: "Request failed".to_string(),
                status: Some(response.status),
                code: None,
                payload: Some(payload),
            },
        )
    }
}

/// The orchestrator: decides real-vs-mock per call and performs the real
/// request under a timeout. Stateless across calls apart from its
/// configuration snapshot; the health probe runs fresh on every dispatch.
pub struct Dispatcher {
    config: Config,
    transport: Arc<dyn HttpTransport>,
    mock: MockResponder,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl Dispatcher {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            mock: MockResponder::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: health::DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_mock_latency(mut self, latency: Duration) -> Self {
        self.mock = MockResponder::with_latency(latency);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET relative to the configured base (absolute URLs pass through).
    pub async fn get(&self, path: &str) -> DispatchResult {
        if MockResponder::is_enabled(&self.config) {
            debug!("mock mode enabled; serving GET {} locally", path);
            return self.mock.get(path).await;
        }

        let probe = health::probe(self.transport.as_ref(), &self.config, self.probe_timeout).await;
        if !probe.reachable {
            warn!(reason = %probe.reason, "backend unreachable; serving GET {} from mock", path);
            return self.mock.get(path).await.into_fallback();
        }

        let url = build_url(&self.config.api_base, path);
        match execute_with_timeout(
            self.transport.as_ref(),
            HttpRequest::get(url),
            self.request_timeout,
        )
        .await
        {
            Ok(response) => interpret_response(response),
            Err(error) => DispatchResult::from_transport_error(&error),
        }
    }

    /// POST a JSON body relative to the configured base. A transport-level
    /// failure is retried once via the mock responder; a valid HTTP error
    /// status reaches the caller unchanged.
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> DispatchResult {
        let body = match serde_json::to_value(body) {
            Ok(value) => value,
            Err(error) => {
                return DispatchResult::failed(
                    0,
                    DispatchError {
                        message: error.to_string(),
                        status: None,
                        code: Some("ENCODE".to_string()),
                        payload: None,
                    },
                )
            }
        };

        if MockResponder::is_enabled(&self.config) {
            debug!("mock mode enabled; serving POST {} locally", path);
            return self.mock.post(path, &body).await;
        }

        let probe = health::probe(self.transport.as_ref(), &self.config, self.probe_timeout).await;
        if !probe.reachable {
            warn!(reason = %probe.reason, "backend unreachable; serving POST {} from mock", path);
            return self.mock.post(path, &body).await.into_fallback();
        }

        let url = build_url(&self.config.api_base, path);
        match execute_with_timeout(
            self.transport.as_ref(),
            HttpRequest::post(url, body.clone()),
            self.request_timeout,
        )
        .await
        {
            Ok(response) => interpret_response(response),
            Err(error) => {
                warn!("transport failure on POST {} ({}); retrying via mock", path, error);
                let fallback = self.mock.post(path, &body).await;
                if fallback.is_ok() {
                    fallback.into_fallback()
                } else {
                    DispatchResult::from_transport_error(&error)
                }
            }
        }
    }

    /// POST the conversation to the chat endpoint.
    pub async fn chat(&self, messages: &[ChatMessage]) -> DispatchResult {
        let request = ChatRequest {
            messages: messages.to_vec(),
        };
        self.post("/chat", &request).await
    }
}
