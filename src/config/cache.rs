//! Cache configuration.
//!
//! Caching is optional: when `REDIS_URL` is unset the application runs
//! with the cache disabled and every read goes straight to the database.
//!
//! # Environment Variables
//!
//! - `REDIS_URL`: Redis connection URL (optional)
//! - `CACHE_TTL_SECONDS`: default TTL for cached items (default: `300`)

use std::env;

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub redis_url: Option<String>,
    pub default_ttl_seconds: u64,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok(),
            default_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}
