use crate::store::{schema, KvStore};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// A `KvStore` backed by a single SQLite file holding one `kv` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteStore {
    /// - Validates that no file currently exists at `path`
    /// - Creates a new SQLite file at `path`
    /// - Creates the schema
    pub async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            bail!("A store already exists at {}", path.display());
        }
        let pool = connect(path, true).await?;
        schema::ensure(&pool)
            .await
            .with_context(|| format!("Unable to create the store at {}", path.display()))?;
        debug!("Created store at {}", path.display());
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// - Validates that there is a SQLite file at `path`
    /// - Checks the schema version, creating the tables if they are missing
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("The store file is missing '{}'", path.display());
        }
        let pool = connect(path, false).await?;
        schema::ensure(&pool)
            .await
            .with_context(|| format!("Unable to open the store at {}", path.display()))?;

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn connect(path: &Path, create: bool) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
        .context("Failed to parse SQLite connection string")?
        .create_if_missing(create);

    // One connection: there is exactly one writer and it waits for every write.
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Unable to open SQLite store at {}", path.display()))
}

#[async_trait]
impl KvStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to read key '{key}'"))?;
        Ok(row.map(|(value,)| value))
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin write transaction")?;
        for (key, value) in entries {
            sqlx::query(
                "INSERT INTO kv (key, value) VALUES (?, ?) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
            )
            .bind(*key)
            .bind(value.as_str())
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to write key '{key}'"))?;
        }
        tx.commit()
            .await
            .context("Failed to commit write transaction")?;
        Ok(())
    }
}
