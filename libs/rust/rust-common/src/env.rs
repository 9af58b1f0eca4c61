//! Environment variable helpers used by every service `Config::from_env`.

use crate::error::PlatformError;
use std::env;
use std::str::FromStr;

/// Load a `.env` file from the working directory if one exists.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Read a variable, falling back to `default` when unset.
#[must_use]
pub fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable with a default value.
///
/// # Errors
///
/// Returns [`PlatformError::InvalidConfig`] if the variable is set but does not parse.
pub fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, PlatformError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => parse_value(name, &val),
        Err(_) => Ok(default),
    }
}

/// Read a variable that must be present and non-empty.
///
/// # Errors
///
/// Returns [`PlatformError::MissingConfig`] when unset or blank.
pub fn require_env(name: &str) -> Result<String, PlatformError> {
    non_empty(name, env::var(name).ok())
}

/// Read and parse a variable that must be present.
///
/// # Errors
///
/// Returns [`PlatformError::MissingConfig`] when unset, or
/// [`PlatformError::InvalidConfig`] when it does not parse.
pub fn require_parsed<T: FromStr>(name: &str) -> Result<T, PlatformError>
where
    T::Err: std::fmt::Display,
{
    let raw = require_env(name)?;
    parse_value(name, &raw)
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, PlatformError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| PlatformError::invalid_config(name, e.to_string()))
}

fn non_empty(name: &str, value: Option<String>) -> Result<String, PlatformError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PlatformError::MissingConfig(name.to_string())),
    }
}
