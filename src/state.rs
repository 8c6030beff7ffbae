use std::time::Duration;

use sqlx::PgPool;
use tracing::warn;

use crate::cache::RedisCache;
use crate::config::cache::CacheConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::server::ServerConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    /// `None` when `REDIS_URL` is unset or Redis is unreachable; every
    /// read then goes straight to the database.
    pub cache: Option<RedisCache>,
}

pub async fn init_app_state() -> AppState {
    let cache_config = CacheConfig::from_env();
    let cache = match &cache_config.redis_url {
        Some(url) => {
            match RedisCache::new(url, Duration::from_secs(cache_config.default_ttl_seconds)).await
            {
                Ok(cache) => Some(cache),
                Err(e) => {
                    warn!(error = %e, "Redis unavailable, running with caching disabled");
                    None
                }
            }
        }
        None => None,
    };

    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
        cache,
    }
}
