pub mod favorites;
pub mod models;
pub mod recipes;
pub mod shopping_lists;

use crate::config::StoreConfig;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub type DbPool = Pool<Sqlite>;

async fn ensure_parent_dir(database_url: &str) -> Result<()> {
    // Create data directory if it doesn't exist (for file-backed SQLite)
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        if path.starts_with(":memory:") {
            return Ok(());
        }
        if let Some(parent) = Path::new(path.trim_start_matches("//")).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }
    Ok(())
}

/// Initialize database connection pool
pub async fn init_pool(database_url: &str) -> Result<DbPool> {
    ensure_parent_dir(database_url).await?;

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // A single connection keeps `sqlite::memory:` databases alive and shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Initialize database connection pool with custom configuration
pub async fn init_pool_with_config(config: &StoreConfig) -> Result<DbPool> {
    ensure_parent_dir(&config.database_url).await?;

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let pool_options = if config.database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_pool() {
        let pool = init_pool("sqlite::memory:").await;
        assert!(pool.is_ok());
    }

    #[tokio::test]
    async fn test_migrations_apply() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_file_pool_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("recipes.db");
        let url = format!("sqlite:{}", db_path.display());

        let pool = init_pool(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert!(db_path.exists());
    }
}
