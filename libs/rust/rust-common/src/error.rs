//! Error type shared by the platform helpers.
//!
//! Covers configuration loading, boundary validation and token handling.
//! Service crates wrap it in their own error enums.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A required configuration value is absent or empty
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// A configuration value could not be parsed
    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig {
        /// Variable name
        name: String,
        /// Parse failure description
        reason: String,
    },

    /// Request payload failed boundary validation
    #[error("{0}")]
    InvalidInput(String),

    /// Bearer token is past its `exp` claim
    #[error("Token expired")]
    TokenExpired,

    /// Bearer token is malformed or its signature does not verify
    #[error("Token invalid: {0}")]
    TokenInvalid(String),

    /// Token could not be signed
    #[error("Token signing failed: {0}")]
    TokenSigning(String),
}

impl PlatformError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error concerns bearer token verification.
    #[must_use]
    pub const fn is_token_error(&self) -> bool {
        matches!(self, Self::TokenExpired | Self::TokenInvalid(_))
    }
}

impl From<jsonwebtoken::errors::Error> for PlatformError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::InvalidSignature => Self::TokenInvalid("signature mismatch".to_string()),
            ErrorKind::MissingRequiredClaim(claim) => {
                Self::TokenInvalid(format!("missing claim {claim}"))
            }
            _ => Self::TokenInvalid("malformed token".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlatformError::MissingConfig("JWT_SECRET".to_string());
        assert_eq!(err.to_string(), "Missing required configuration: JWT_SECRET");

        let err = PlatformError::invalid_config("PORT", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for PORT: invalid digit found in string"
        );
    }

    #[test]
    fn test_invalid_input_is_verbatim() {
        let err = PlatformError::invalid_input("email must be an email");
        assert_eq!(err.to_string(), "email must be an email");
    }

    #[test]
    fn test_token_error_classification() {
        assert!(PlatformError::TokenExpired.is_token_error());
        assert!(PlatformError::TokenInvalid("x".to_string()).is_token_error());
        assert!(!PlatformError::TokenSigning("x".to_string()).is_token_error());
        assert!(!PlatformError::MissingConfig("x".to_string()).is_token_error());
    }

    #[test]
    fn test_jwt_error_conversion() {
        let err: PlatformError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature)
                .into();
        assert_eq!(err, PlatformError::TokenExpired);

        let err: PlatformError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidToken).into();
        assert!(matches!(err, PlatformError::TokenInvalid(_)));
    }
}
