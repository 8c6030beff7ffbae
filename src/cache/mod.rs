//! Optional Redis-backed query cache.
//!
//! Collection reads go through the cache when it is configured; every
//! mutation invalidates exactly the keys for the collections it affects
//! via the typed builders in [`keys`]. Cache failures degrade to the
//! database and are never surfaced to callers.

pub mod keys;
pub mod redis;

pub use redis::{CacheError, RedisCache};
