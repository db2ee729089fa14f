//! Database connection pool initialization.
//!
//! Reads the connection string from `DATABASE_URL` and builds the SQLx pool
//! shared through [`crate::state::AppState`]. The pool is cheaply cloneable
//! and should be created once during startup.
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is unset or the database cannot
//! be reached; there is nothing useful the server can do without a database.

use sqlx::PgPool;
use std::env;

pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
