//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits. The schema in
//! `schema.sql` is applied every time a pool is created.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = include_str!("schema.sql");

/// Create a SQLite connection pool and apply the schema.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string, e.g. `sqlite://fyyur.db`
///
/// # Errors
///
/// Returns an error if the database can't be opened or the schema fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://fyyur.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    apply_schema(&pool).await?;
    tracing::debug!(url = %database_url, max_connections, "database pool ready");
    Ok(pool)
}

/// Create a private in-memory database.
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    apply_schema(&pool).await?;
    Ok(pool)
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn memory_pool_has_seeded_genres() {
        let pool = create_memory_pool().await.expect("pool creation failed");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(count, 19);
    }

    #[tokio::test]
    async fn schema_is_idempotent() {
        let pool = create_memory_pool().await.expect("pool creation failed");
        apply_schema(&pool).await.expect("second apply failed");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(count, 19);
    }

    #[tokio::test]
    async fn file_pool_creates_database() {
        let dir = TempDir::new().expect("temp dir");
        let url = format!("sqlite://{}", dir.path().join("pool.db").display());

        let pool = create_pool(&url).await.expect("pool creation failed");
        let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("pragma failed");
        assert_eq!(fk, 1);

        pool.close().await;
    }
}
