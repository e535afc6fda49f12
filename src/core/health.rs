//! Lightweight backend reachability probe, distinct from the main request
//! path. Every failure mode resolves to a structured [`HealthStatus`].

use std::time::Duration;

use tracing::debug;

use crate::core::config::Config;
use crate::core::dispatch::{execute_with_timeout, HttpRequest, HttpTransport};
use crate::utils::url::build_url;

/// Default budget for one probe attempt. Kept well under the request
/// timeout so the fallback path stays responsive.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeReason {
    NoBaseConfigured,
    HealthOk,
    HeadOk,
    HeadStatus(u16),
    HeadError,
}

impl std::fmt::Display for ProbeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeReason::NoBaseConfigured => write!(f, "no base configured"),
            ProbeReason::HealthOk => write!(f, "health endpoint ok"),
            ProbeReason::HeadOk => write!(f, "head ok"),
            ProbeReason::HeadStatus(status) => write!(f, "head status {}", status),
            ProbeReason::HeadError => write!(f, "head error"),
        }
    }
}

/// Transient per-probe verdict; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub reachable: bool,
    pub reason: ProbeReason,
}

impl HealthStatus {
    fn up(reason: ProbeReason) -> Self {
        Self {
            reachable: true,
            reason,
        }
    }

    fn down(reason: ProbeReason) -> Self {
        Self {
            reachable: false,
            reason,
        }
    }
}

/// Probe the configured backend within the given budget.
///
/// With no base configured the probe short-circuits without any network
/// call. Otherwise `GET {base}/health` must answer exactly 200; failing
/// that, a HEAD against the bare base settles it: 2xx is reachable, any
/// other status or a transport failure is not.
pub async fn probe(
    transport: &dyn HttpTransport,
    config: &Config,
    budget: Duration,
) -> HealthStatus {
    if config.has_no_backend() {
        return HealthStatus::down(ProbeReason::NoBaseConfigured);
    }

    let health_url = build_url(&config.api_base, "/health");
    match execute_with_timeout(transport, HttpRequest::get(health_url), budget).await {
        Ok(response) if response.status == 200 => {
            return HealthStatus::up(ProbeReason::HealthOk);
        }
        Ok(response) => {
            debug!("health endpoint answered {}; trying HEAD", response.status);
        }
        Err(error) => {
            debug!("health endpoint unreachable ({}); trying HEAD", error);
        }
    }

    let head = HttpRequest::head(config.api_base.clone());
    match execute_with_timeout(transport, head, budget).await {
        Ok(response) if (200..300).contains(&response.status) => {
            HealthStatus::up(ProbeReason::HeadOk)
        }
        Ok(response) => HealthStatus::down(ProbeReason::HeadStatus(response.status)),
        Err(_) => HealthStatus::down(ProbeReason::HeadError),
    }
}
