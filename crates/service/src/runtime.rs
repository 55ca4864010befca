//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime` without depending directly on `common`.

/// Make sure the directory of a file-backed SQLite database exists.
pub async fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    common::env::ensure_sqlite_parent(database_url).await
}
