//! Configuration for the authentication service.
//!
//! All configuration is loaded from environment variables (after an optional
//! `.env` file) and validated at startup.

use rust_common::env::{self, parse_env, require_env, require_parsed};
use rust_common::{JwtConfig, PlatformError};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::password::{DEFAULT_COST, MAX_COST, MIN_COST};

/// Default gRPC port.
pub const DEFAULT_PORT: u16 = 3001;

/// Authentication service configuration.
#[derive(Clone)]
pub struct Config {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// Database name override
    pub mongo_database: Option<String>,
    /// Redis host
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Token signing
    pub jwt: JwtConfig,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Drain period after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("mongo_uri", &"[hidden]")
            .field("mongo_database", &self.mongo_database)
            .field("redis_host", &self.redis_host)
            .field("redis_port", &self.redis_port)
            .field("jwt", &self.jwt)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self, PlatformError> {
        env::load_dotenv();

        let config = Self {
            host: env::env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", DEFAULT_PORT)?,
            mongo_uri: require_env("MONGO_URI")?,
            mongo_database: std::env::var("MONGO_DATABASE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            redis_host: require_env("REDIS_HOST")?,
            redis_port: require_parsed("REDIS_PORT")?,
            jwt: JwtConfig::from_env()?,
            bcrypt_cost: parse_env("BCRYPT_COST", DEFAULT_COST)?,
            shutdown_timeout: Duration::from_secs(parse_env("SHUTDOWN_TIMEOUT", 30)?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidConfig`] naming the offending variable.
    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.port == 0 {
            return Err(PlatformError::invalid_config("PORT", "must be non-zero"));
        }
        if self.redis_port == 0 {
            return Err(PlatformError::invalid_config(
                "REDIS_PORT",
                "must be non-zero",
            ));
        }
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            return Err(PlatformError::invalid_config(
                "BCRYPT_COST",
                format!("must be between {MIN_COST} and {MAX_COST}"),
            ));
        }
        if !self.mongo_uri.starts_with("mongodb://") && !self.mongo_uri.starts_with("mongodb+srv://")
        {
            return Err(PlatformError::invalid_config(
                "MONGO_URI",
                "must use the mongodb:// or mongodb+srv:// scheme",
            ));
        }
        Ok(())
    }

    /// Redis connection URL.
    #[must_use]
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.redis_host, self.redis_port)
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
