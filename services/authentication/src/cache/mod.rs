//! Key-value cache in front of the user store.
//!
//! Only one key is used: [`ALL_USERS_KEY`], holding the serialized user
//! listing. It is written without expiry and deleted on every successful
//! registration.

pub mod memory;
pub mod redis;

pub use memory::{CacheStats, InMemoryCache};
pub use self::redis::RedisCache;

use crate::error::AuthError;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Cache key for the full user listing.
pub const ALL_USERS_KEY: &str = "all_users";

/// String-valued cache.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Read the raw value under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Store `value` under `key` with no expiry.
    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Remove `key`. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), AuthError>;
}

/// Read and decode a JSON value.
///
/// # Errors
///
/// Returns [`AuthError::Cache`] if the cache fails and
/// [`AuthError::Serialization`] if the stored payload does not decode.
pub async fn get_json<T: DeserializeOwned>(
    cache: &dyn Cache,
    key: &str,
) -> Result<Option<T>, AuthError> {
    match cache.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and store a JSON value.
///
/// # Errors
///
/// Returns [`AuthError::Serialization`] if encoding fails and
/// [`AuthError::Cache`] if the cache rejects the write.
pub async fn set_json<T: Serialize + Sync>(
    cache: &dyn Cache,
    key: &str,
    value: &T,
) -> Result<(), AuthError> {
    let raw = serde_json::to_string(value)?;
    cache.set(key, &raw).await
}
