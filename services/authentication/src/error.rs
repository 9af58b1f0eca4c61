//! Error handling for the authentication service.
//!
//! Domain errors (`Conflict`, `Unauthorized`) carry a client-facing message.
//! Infrastructure errors keep their detail for logs and are replaced by a
//! generic message when converted to a gRPC status.

use rust_common::PlatformError;
use thiserror::Error;
use tonic::{Code, Status};

/// Message returned for every failed credential check.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Message returned when email or password is absent.
pub const MISSING_CREDENTIALS: &str = "Email and password are required";

/// Message returned on duplicate registration.
pub const USER_EXISTS: &str = "User already exists";

/// Authentication service error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email already registered
    #[error("{0}")]
    Conflict(String),

    /// Missing credentials, unknown email or wrong password
    #[error("{0}")]
    Unauthorized(String),

    /// User store unreachable or failed
    #[error("User store error: {0}")]
    Store(String),

    /// Cache unreachable or failed
    #[error("Cache error: {0}")]
    Cache(String),

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Token signing failed
    #[error("Token error: {0}")]
    Token(String),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Startup configuration rejected
    #[error(transparent)]
    Config(#[from] PlatformError),
}

impl AuthError {
    /// Create a conflict error for a duplicate email.
    #[must_use]
    pub fn user_exists() -> Self {
        Self::Conflict(USER_EXISTS.to_string())
    }

    /// Create the uniform bad-credentials error.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::Unauthorized(INVALID_CREDENTIALS.to_string())
    }

    /// Create the missing-credentials error.
    #[must_use]
    pub fn missing_credentials() -> Self {
        Self::Unauthorized(MISSING_CREDENTIALS.to_string())
    }

    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a cache error.
    #[must_use]
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Domain errors are expected outcomes, not faults.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::Unauthorized(_))
    }

    /// Whether the same request could succeed later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Cache(_))
    }

    /// gRPC status code for this error.
    #[must_use]
    pub const fn grpc_code(&self) -> Code {
        match self {
            Self::Conflict(_) => Code::AlreadyExists,
            Self::Unauthorized(_) => Code::Unauthenticated,
            Self::Store(_) | Self::Cache(_) => Code::Unavailable,
            _ => Code::Internal,
        }
    }

    /// Convert to a gRPC status without leaking infrastructure detail.
    #[must_use]
    pub fn to_status(&self) -> Status {
        let message = match self {
            Self::Conflict(msg) | Self::Unauthorized(msg) => msg.clone(),
            Self::Store(_) | Self::Cache(_) => "Service temporarily unavailable".to_string(),
            _ => "Internal error".to_string(),
        };
        Status::new(self.grpc_code(), message)
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        err.to_status()
    }
}

impl From<mongodb::error::Error> for AuthError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<redis::RedisError> for AuthError {
    fn from(err: redis::RedisError) -> Self {
        Self::Cache(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Hashing(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_message() {
        let status = AuthError::user_exists().to_status();
        assert_eq!(status.code(), Code::AlreadyExists);
        assert_eq!(status.message(), "User already exists");

        let status = AuthError::invalid_credentials().to_status();
        assert_eq!(status.code(), Code::Unauthenticated);
        assert_eq!(status.message(), "Invalid credentials");

        let status = AuthError::missing_credentials().to_status();
        assert_eq!(status.message(), "Email and password are required");
    }

    #[test]
    fn test_infrastructure_errors_are_sanitized() {
        let status = AuthError::store("connection refused mongodb://admin:pw@db").to_status();
        assert_eq!(status.code(), Code::Unavailable);
        assert!(!status.message().contains("pw"));

        let status = AuthError::Hashing("cost out of range".to_string()).to_status();
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Internal error");
    }

    #[test]
    fn test_classification() {
        assert!(AuthError::user_exists().is_domain());
        assert!(AuthError::invalid_credentials().is_domain());
        assert!(!AuthError::cache("down").is_domain());

        assert!(AuthError::cache("down").is_retryable());
        assert!(AuthError::store("down").is_retryable());
        assert!(!AuthError::user_exists().is_retryable());
        assert!(!AuthError::Token("bad key".to_string()).is_retryable());
    }
}
