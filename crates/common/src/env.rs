//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::debug;

/// Create `data_dir` (and parents) if it does not exist yet.
pub async fn ensure_dir(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}

/// Ensure the directory holding a `sqlite://<path>?...` database file exists.
///
/// In-memory URLs and bare file names need nothing.
pub async fn ensure_sqlite_parent(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            debug!(dir = %parent.display(), "ensuring database directory");
            ensure_dir(&parent.to_string_lossy()).await
        }
        _ => Ok(()),
    }
}

/// File path part of a SQLite URL, `None` for in-memory databases.
pub fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_paths() {
        assert_eq!(sqlite_file_path("sqlite://products.db?mode=rwc"), Some("products.db"));
        assert_eq!(sqlite_file_path("sqlite:data/products.db"), Some("data/products.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn creates_missing_database_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/data");
        let url = format!("sqlite://{}/products.db?mode=rwc", dir.display());
        ensure_sqlite_parent(&url).await.unwrap();
        assert!(dir.is_dir());
    }
}
