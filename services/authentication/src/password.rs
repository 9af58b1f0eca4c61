//! Password hashing.
//!
//! bcrypt is CPU-bound, so hashing and verification run on the blocking pool.

use crate::error::AuthError;
use async_trait::async_trait;
use tracing::warn;

/// Default bcrypt work factor.
pub const DEFAULT_COST: u32 = 10;

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// One-way salted password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check `password` against a stored hash.
    ///
    /// A malformed stored hash verifies as `false`.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// bcrypt hasher with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl BcryptHasher {
    /// Create a hasher with the given work factor.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(AuthError::from)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_string();
        let hash = hash.to_string();
        let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        match result {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                Ok(false)
            }
        }
    }
}
