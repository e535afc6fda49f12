//! Environment-driven configuration snapshot.
//!
//! Resolved once at process start and passed by reference to every
//! component; nothing mutates it afterwards and no component keeps a hidden
//! module-level copy.

/// Environment variable naming the API base URL override.
pub const ENV_API_BASE: &str = "BACKCHAT_API_BASE";
/// Environment variable naming the backend URL override.
pub const ENV_BACKEND_URL: &str = "BACKCHAT_BACKEND_URL";
/// Environment variable naming the frontend origin.
pub const ENV_FRONTEND_URL: &str = "BACKCHAT_FRONTEND_URL";
/// Environment variable naming the websocket URL (resolved but unused here).
pub const ENV_WS_URL: &str = "BACKCHAT_WS_URL";
/// Environment variable naming the environment (development, production, ...).
pub const ENV_ENVIRONMENT: &str = "BACKCHAT_ENV";
/// Environment variable naming the frontend port.
pub const ENV_PORT: &str = "BACKCHAT_PORT";
/// Environment variable naming the log level.
pub const ENV_LOG_LEVEL: &str = "BACKCHAT_LOG_LEVEL";
/// Environment variable carrying the raw feature-flag string.
pub const ENV_FEATURE_FLAGS: &str = "BACKCHAT_FEATURE_FLAGS";
/// Environment variable enabling experiments (exact string "true").
pub const ENV_EXPERIMENTS_ENABLED: &str = "BACKCHAT_EXPERIMENTS_ENABLED";

#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved API base URL; empty means no real backend is configured.
    pub api_base: String,
    pub frontend_url: String,
    pub ws_url: String,
    pub environment: String,
    pub port: String,
    pub log_level: String,
    /// Raw feature-flag string; parsed lazily by consumers.
    pub feature_flags: String,
    pub experiments_enabled: bool,
}

impl Config {
    /// Snapshot the process environment.
    pub fn resolve() -> Config {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary lookup function.
    ///
    /// API base precedence: explicit API base override, then backend URL
    /// override, then `{frontend origin}/api`, then empty. Values that are
    /// blank after trimming fall through to the next source.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let trimmed = |key: &str| -> Option<String> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let frontend_url = trimmed(ENV_FRONTEND_URL).unwrap_or_default();

        let api_base = trimmed(ENV_API_BASE)
            .or_else(|| trimmed(ENV_BACKEND_URL))
            .or_else(|| {
                if frontend_url.is_empty() {
                    None
                } else {
                    Some(format!("{}/api", frontend_url))
                }
            })
            .unwrap_or_default();

        Config {
            api_base,
            frontend_url,
            ws_url: trimmed(ENV_WS_URL).unwrap_or_default(),
            environment: trimmed(ENV_ENVIRONMENT).unwrap_or_else(|| "development".to_string()),
            port: trimmed(ENV_PORT).unwrap_or_default(),
            log_level: trimmed(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string()),
            feature_flags: lookup(ENV_FEATURE_FLAGS).unwrap_or_default(),
            experiments_enabled: lookup(ENV_EXPERIMENTS_ENABLED).as_deref() == Some("true"),
        }
    }

    /// True when no real backend is configured.
    pub fn has_no_backend(&self) -> bool {
        self.api_base.is_empty()
    }
}
