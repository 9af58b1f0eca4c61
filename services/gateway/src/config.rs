//! Configuration for the gateway.
//!
//! Loaded from environment variables (after an optional `.env` file) and
//! validated at startup.

use rust_common::env::{self, parse_env};
use rust_common::{JwtConfig, PlatformError};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default address of the authentication service.
pub const DEFAULT_AUTH_SERVICE_URL: &str = "http://authentication:3001";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Authentication service endpoint
    pub auth_service_url: String,
    /// Bearer verification
    pub jwt: JwtConfig,
    /// Requests allowed per client per window
    pub rate_limit: u32,
    /// Throttle window
    pub rate_limit_window: Duration,
    /// Drain period after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or a value is invalid.
    pub fn from_env() -> Result<Self, PlatformError> {
        env::load_dotenv();

        let config = Self {
            host: env::env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", DEFAULT_PORT)?,
            auth_service_url: env::env_or("AUTH_SERVICE_URL", DEFAULT_AUTH_SERVICE_URL),
            jwt: JwtConfig::from_env()?,
            rate_limit: parse_env("RATE_LIMIT", 10)?,
            rate_limit_window: Duration::from_secs(parse_env("RATE_LIMIT_WINDOW", 60)?),
            shutdown_timeout: Duration::from_secs(parse_env("SHUTDOWN_TIMEOUT", 30)?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and the upstream URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidConfig`] naming the offending variable.
    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.port == 0 {
            return Err(PlatformError::invalid_config("PORT", "must be non-zero"));
        }
        if self.rate_limit == 0 {
            return Err(PlatformError::invalid_config("RATE_LIMIT", "must be non-zero"));
        }
        if self.rate_limit_window.is_zero() {
            return Err(PlatformError::invalid_config(
                "RATE_LIMIT_WINDOW",
                "must be non-zero",
            ));
        }

        let url = Url::parse(&self.auth_service_url)
            .map_err(|e| PlatformError::invalid_config("AUTH_SERVICE_URL", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(PlatformError::invalid_config(
                "AUTH_SERVICE_URL",
                "must be an http(s) URL with a host",
            ));
        }
        Ok(())
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidConfig`] if `HOST` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, PlatformError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| PlatformError::invalid_config("HOST", format!("{e}")))
    }
}
