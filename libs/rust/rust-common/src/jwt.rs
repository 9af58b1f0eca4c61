//! Access token claims, HS256 signing and bearer verification.
//!
//! The authentication service signs tokens at login; the gateway verifies
//! them before forwarding protected requests. Both sides share the secret.

use crate::env;
use crate::error::PlatformError;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Token lifetime used when `JWT_EXPIRATION` is unset.
pub const DEFAULT_EXPIRATION: &str = "1h";

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, valid for `ttl` from now.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: subject.into(),
            email: email.into(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
        }
    }

    /// User id carried by the token.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// JWT signing configuration.
#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 shared secret
    pub secret: String,
    /// Token lifetime
    pub expiration: Duration,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl JwtConfig {
    /// Create a configuration from a secret and lifetime.
    pub fn new(secret: impl Into<String>, expiration: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiration,
        }
    }

    /// Load from `JWT_SECRET` (required) and `JWT_EXPIRATION` (default `1h`).
    ///
    /// # Errors
    ///
    /// Fails when the secret is missing or the expiration does not parse.
    pub fn from_env() -> Result<Self, PlatformError> {
        let secret = env::require_env("JWT_SECRET")?;
        let raw = env::env_or("JWT_EXPIRATION", DEFAULT_EXPIRATION);
        let expiration = parse_expiration(&raw)
            .map_err(|reason| PlatformError::invalid_config("JWT_EXPIRATION", reason))?;
        Ok(Self::new(secret, expiration))
    }
}

/// Parse a token lifetime such as `"30s"`, `"15m"`, `"1h"`, `"7d"`, `"2w"`,
/// `"500ms"` or bare seconds (`"3600"`).
///
/// # Errors
///
/// Returns a description of the problem for empty, zero or unknown-unit input.
pub fn parse_expiration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("expected a number with optional unit, got {raw:?}"))?;
    if amount == 0 {
        return Err("expiration must be greater than zero".to_string());
    }

    let secs_per_unit: u64 = match unit.trim() {
        "ms" => return Ok(Duration::from_millis(amount)),
        "" | "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        other => return Err(format!("unknown unit {other:?}")),
    };

    amount
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("expiration {raw:?} overflows"))
}

/// HS256 token signer and verifier.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a service from configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign a token for the given subject and email.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::TokenSigning`] if encoding fails.
    pub fn sign(&self, subject: &str, email: &str) -> Result<String, PlatformError> {
        let claims = Claims::new(subject, email, self.config.expiration);
        self.sign_claims(&claims)
    }

    /// Sign pre-built claims.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::TokenSigning`] if encoding fails.
    pub fn sign_claims(&self, claims: &Claims) -> Result<String, PlatformError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| PlatformError::TokenSigning(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::TokenExpired`] or [`PlatformError::TokenInvalid`].
    pub fn verify(&self, token: &str) -> Result<Claims, PlatformError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Configured token lifetime.
    #[must_use]
    pub const fn expiration(&self) -> Duration {
        self.config.expiration
    }
}
