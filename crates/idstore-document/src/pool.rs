//! Database connection pool management.

use idstore_core::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::{DocumentError, DocumentResult};

/// Creates a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns an error if the pool cannot be created.
pub async fn create_pool(config: &DatabaseConfig) -> DocumentResult<PgPool> {
    options(config)
        .connect(&config.url)
        .await
        .map_err(|e| DocumentError::Connection(e.to_string()))
}

/// Creates a pool that only connects on first use.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed.
pub fn create_lazy_pool(config: &DatabaseConfig) -> DocumentResult<PgPool> {
    options(config)
        .connect_lazy(&config.url)
        .map_err(|e| DocumentError::Connection(e.to_string()))
}

fn options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(Some(config.idle_timeout()))
}
