//! Redis-backed cache.

use super::Cache;
use crate::error::AuthError;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

/// Cache over a multiplexed Redis connection.
///
/// `ConnectionManager` reconnects on its own and is cheap to clone, so
/// each call works on its own handle.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Connect to `redis://host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Cache`] if the URL is invalid or the initial
    /// connection fails.
    pub async fn connect(url: &str) -> Result<Self, AuthError> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        info!("Connected to cache");
        Ok(Self { connection })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut conn = self.connection.clone();
        let () = conn.set(key, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AuthError> {
        let mut conn = self.connection.clone();
        let _removed: i64 = conn.del(key).await?;
        Ok(())
    }
}
