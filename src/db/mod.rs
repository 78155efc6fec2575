pub mod repository;

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use tracing::{error, info};

use crate::error::AppError;

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Single-connection in-memory database. Every pooled connection to
/// `sqlite::memory:` is its own database, so the pool is pinned to one.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
}

pub async fn verify(db: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("select 1").execute(db).await?;
    Ok(())
}

pub async fn migrate(db: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(db).await?;
    Ok(())
}

/// Startup check: the store must answer before the schema is brought up to date.
pub async fn init(db: &SqlitePool) -> Result<(), AppError> {
    if let Err(e) = verify(db).await {
        error!("database connectivity check failed: {}", e);
        return Err(e.into());
    }
    info!("database connection established");

    if let Err(e) = migrate(db).await {
        error!("failed to apply migrations: {}", e);
        return Err(e);
    }

    Ok(())
}
