//! Topic and user storage for the Daily Knowledge API.
//!
//! The [`Storage`] trait is the single contract the HTTP layer programs
//! against; [`MemStorage`] and [`PgStorage`] are the interchangeable
//! backends, selected at startup by the presence of a database URL.

pub mod mem;
pub mod models;
pub mod postgres;
pub mod seed;
pub mod storage;

pub use mem::MemStorage;
pub use postgres::PgStorage;
pub use storage::{Storage, StoreError};

use anyhow::Context;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Ensure the database exists and run migrations in this crate's `migrations/` folder.
pub async fn ensure_db_and_migrate(database_url: &str, pool: &PgPool) -> anyhow::Result<()> {
    // Ensure database exists (no-op if it already does)
    let exists = Postgres::database_exists(database_url).await?;
    if !exists {
        Postgres::create_database(database_url).await?;
    }

    // Run migrations bundled at compile time from `migrations/`
    sqlx::migrate!().run(pool).await?;

    Ok(())
}
