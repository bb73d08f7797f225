use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))?;
    Ok(())
}

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Result<String> {
    let s = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))?;
    Ok(s)
}

/// Deserialize a JSON file into type `T`.
pub(crate) async fn deserialize<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    let t = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))?;
    Ok(t)
}

/// Create a directory and all of its parents.
pub(crate) async fn make_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Unable to create directory at {}", path.to_string_lossy()))?;
    Ok(())
}

/// Canonicalize a path, which must exist.
pub(crate) async fn canonicalize(path: &Path) -> Result<PathBuf> {
    let p = tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Unable to canonicalize the path {}", path.to_string_lossy()))?;
    Ok(p)
}

/// Generates an id for a user-created account, e.g. `acc_6f1c0e3b8d6c4a3f9d2b7e41c5a09f12`.
pub(crate) fn generate_account_id() -> String {
    format!("acc_{}", uuid::Uuid::new_v4().simple())
}
