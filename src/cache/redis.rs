//! Redis cache client.
//!
//! Async Redis operations with JSON serialization for cached values.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Redis cache client with a managed connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: Duration,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RedisCache {
    /// Creates a new Redis cache client.
    pub async fn new(redis_url: &str, default_ttl: Duration) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, default_ttl })
    }

    /// Gets a cached value by key.
    ///
    /// Returns `None` on a miss, a Redis error, or a deserialization
    /// failure; readers fall back to the database in all three cases.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!(cache.key = %key, "Cache hit");
                match serde_json::from_str(&value) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        error!(cache.key = %key, error = %e, "Failed to deserialize cached value");
                        None
                    }
                }
            }
            Ok(None) => {
                debug!(cache.key = %key, "Cache miss");
                None
            }
            Err(e) => {
                error!(cache.key = %key, error = %e, "Redis GET error");
                None
            }
        }
    }

    /// Sets a cached value with the default TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SET"))]
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Sets a cached value with a custom TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    pub async fn set_with_ttl<T>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)?;

        conn.set_ex::<_, _, ()>(key, json, ttl.as_secs()).await?;

        debug!(cache.key = %key, cache.ttl_secs = %ttl.as_secs(), "Cache set");

        Ok(())
    }

    /// Invalidates (deletes) a cached key. Deleting an absent key is a
    /// no-op, so repeated invalidation is harmless.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await?;

        debug!(cache.key = %key, "Cache invalidated");

        Ok(())
    }

    /// Invalidates all keys matching a pattern, using SCAN rather than
    /// KEYS so production instances are not blocked.
    #[instrument(skip(self), fields(cache.operation = "SCAN_DEL"))]
    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let count: u64 = conn.del(&keys).await?;
                deleted += count;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        debug!(cache.pattern = %pattern, cache.deleted = %deleted, "Pattern invalidation complete");

        Ok(deleted)
    }
}
