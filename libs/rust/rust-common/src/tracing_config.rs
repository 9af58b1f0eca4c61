//! Tracing subscriber setup shared by both binaries.

use crate::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Service name stamped on the startup event
    pub service_name: String,
    /// Log level filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Whether to output JSON format
    pub json_output: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "rust-service".to_string(),
            log_level: "info".to_string(),
            json_output: false,
        }
    }
}

impl TracingConfig {
    /// Read `LOG_LEVEL` and `LOG_FORMAT` (`text` or `json`).
    #[must_use]
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let format = env::env_or("LOG_FORMAT", "text");
        Self {
            service_name: service_name.into(),
            log_level: env::env_or("LOG_LEVEL", "info"),
            json_output: format.eq_ignore_ascii_case("json"),
        }
    }

    /// Create config with custom service name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Create config with custom log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Install the global subscriber.
///
/// A second call is a no-op, which keeps tests that boot a service twice happy.
pub fn init_tracing(config: &TracingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let installed = if config.json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if installed.is_ok() {
        tracing::info!(service = %config.service_name, "Tracing initialized");
    }
}
