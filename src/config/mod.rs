//! Configuration modules.
//!
//! Each submodule covers one aspect of configuration, loaded from
//! environment variables at process start (`dotenvy` picks up a local
//! `.env` file first).
//!
//! - [`cache`]: optional Redis cache settings
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: session token signing configuration
//! - [`server`]: bind port and static asset directory

pub mod cache;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;
