use tracing_subscriber::EnvFilter;

use crate::core::config::Config;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when present; otherwise the resolved config log level
/// applies. Calling this more than once is harmless: a subscriber that is
/// already installed stays installed.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
