//! Request and response shapes shared by the gateway and the service.
//!
//! `UserView` is the only user representation that is ever serialized. It has
//! no password field, so no code path can leak a hash through it.

use crate::error::PlatformError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[allow(clippy::unwrap_used)]
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check that an address has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Registration payload. Absent fields deserialize as empty so that
/// [`CreateUser::validate`] reports them.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateUser {
    /// Display name
    pub name: String,
    /// Unique email address
    pub email: String,
    /// Plaintext password, at least six characters
    pub password: String,
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl CreateUser {
    /// Validate the payload before it is forwarded.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidInput`] listing every failed rule.
    pub fn validate(&self) -> Result<(), PlatformError> {
        let mut problems = Vec::new();

        if self.name.is_empty() {
            problems.push("name should not be empty".to_string());
        }
        if !is_valid_email(&self.email) {
            problems.push("email must be an email".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            problems.push(format!(
                "password must be longer than or equal to {MIN_PASSWORD_LEN} characters"
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PlatformError::invalid_input(problems.join(", ")))
        }
    }
}

/// Login payload. Both fields may be absent on the wire; the service
/// answers an incomplete pair with Unauthorized.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Account email
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl LoginCredentials {
    /// Build a complete pair.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields present and non-empty.
    #[must_use]
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

/// Sanitized user projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserView {
    /// Opaque user id
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// Successful login reply.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Signed bearer token
    pub access_token: String,
    /// The authenticated user
    pub user: UserView,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"[hidden]")
            .field("user", &self.user)
            .finish()
    }
}
