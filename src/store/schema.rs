//! The tables behind `SqliteStore`: `schema_version`, holding a single row, and `kv`.

use anyhow::{bail, Context, Result};
use sqlx::{Executor, SqlitePool};
use tracing::debug;

/// The schema version this build of the program writes.
pub(crate) const SCHEMA_VERSION: i32 = 1;

const CREATE_KV: &str = "CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)";

/// Brings the file behind `pool` to `SCHEMA_VERSION`, creating the tables if they are missing.
/// A file written by a newer program is refused. Runs in one transaction.
pub(crate) async fn ensure(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin schema transaction")?;

    tx.execute("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)")
        .await
        .context("Failed to create schema_version table")?;
    let version: Option<i32> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(&mut *tx)
        .await
        .context("Failed to query schema version")?;

    match version {
        Some(v) if v > SCHEMA_VERSION => bail!(
            "The store has schema version {v}, which is newer than this program supports \
            ({SCHEMA_VERSION}). Is a newer version of daybook available?"
        ),
        Some(v) if v == SCHEMA_VERSION => {
            debug!("Store already at schema version {v}");
            return Ok(());
        }
        _ => {}
    }

    tx.execute(CREATE_KV)
        .await
        .context("Failed to create kv table")?;
    sqlx::query("DELETE FROM schema_version")
        .execute(&mut *tx)
        .await
        .context("Failed to clear schema_version")?;
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(SCHEMA_VERSION)
        .execute(&mut *tx)
        .await
        .context("Failed to update schema_version")?;
    tx.commit()
        .await
        .context("Failed to commit schema transaction")?;

    debug!("Store schema set to version {SCHEMA_VERSION} (was {version:?})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;
    use tempfile::TempDir;

    async fn empty_pool() -> (TempDir, SqlitePool) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.sqlite");
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        (dir, pool)
    }

    async fn version(pool: &SqlitePool) -> i32 {
        sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_creates_tables_on_an_empty_file() {
        let (_dir, pool) = empty_pool().await;
        ensure(&pool).await.unwrap();
        assert_eq!(version(&pool).await, SCHEMA_VERSION);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_current_schema_keeps_values() {
        let (_dir, pool) = empty_pool().await;
        ensure(&pool).await.unwrap();
        sqlx::query("INSERT INTO kv (key, value) VALUES ('notes', '[]')")
            .execute(&pool)
            .await
            .unwrap();

        ensure(&pool).await.unwrap();
        let value: String = sqlx::query_scalar("SELECT value FROM kv WHERE key = 'notes'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(value, "[]");
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_refuses_a_newer_schema() {
        let (_dir, pool) = empty_pool().await;
        ensure(&pool).await.unwrap();
        sqlx::query("UPDATE schema_version SET version = ?")
            .bind(SCHEMA_VERSION + 1)
            .execute(&pool)
            .await
            .unwrap();
        let e = ensure(&pool).await.unwrap_err();
        assert!(e.to_string().contains("newer than this program supports"));
        assert_eq!(version(&pool).await, SCHEMA_VERSION + 1);
    }
}
