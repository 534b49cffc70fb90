use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Genres,
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Genres => write!(f, "genres:available"),
        }
    }
}

/// Creates a Redis client for caching
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// JSON value cache backed by Redis
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
}

impl Cache {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }

    /// Retrieves a value from the cache by key
    ///
    /// Returns `None` when the key does not exist.
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(key.to_string()).await?;

        match cached {
            Some(json) => {
                let data = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Stores a value under `key` for `ttl` seconds
    pub async fn set_in_cache<T: serde::Serialize>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Cache serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key.to_string(), json, ttl).await?;
        Ok(())
    }
}
