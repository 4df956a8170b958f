//! # Rollcall DB
//!
//! Database pool and migrations for the Rollcall API.
//!
//! This crate provides connection pool initialization using SQLx with
//! PostgreSQL, and applies the migrations bundled under `migrations/`.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::DatabaseConfig;
//! use rollcall_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_db_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use anyhow::Context;
use rollcall_config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and should be handed to the
/// application state once at startup.
///
/// # Errors
///
/// Fails if the database cannot be reached with the configured URL.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies every pending migration from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!(count = MIGRATOR.iter().count(), "Database migrations applied");
    Ok(())
}
