#![cfg(test)]
use sea_orm::DatabaseConnection;

/// A private, migrated in-memory database for the calling test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::in_memory().await
}
