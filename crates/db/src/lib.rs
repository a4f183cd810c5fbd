//! PostgreSQL storage layer: connection pool, entity models, repositories,
//! and the [`CatalogStore`] seam the recommendation engine consumes.

pub mod models;
pub mod repositories;
pub mod store;

pub use store::{CatalogStore, PgCatalogStore, StoreError, StoreResult};

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
