//! Database connection pool initialization.
//!
//! The connection string is read from the `DATABASE_URL` environment
//! variable. The returned [`PgPool`] is cheaply cloneable and shared via
//! the application state.
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is unset or the initial
//! connection fails; there is nothing useful the server can do without a
//! database.

use sqlx::PgPool;
use std::env;

pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
