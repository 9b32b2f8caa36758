//! Key-Value Storage using SQLite

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::KeyValueStore,
};
use sqlx::{
    sqlite::{SqlitePool, SqlitePoolOptions},
    Row,
};
use std::path::PathBuf;
use tracing::debug;

/// SQLite-backed key-value store implementation
///
/// Provides persistent string storage that survives restarts, the
/// desktop stand-in for web localStorage.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Create a new store with the given database path
    pub async fn new(db_path: PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::Io)?;
        }

        // Convert path to string, replacing backslashes with forward slashes for SQLite URL
        let path_str = db_path.to_string_lossy().replace('\\', "/");
        let db_url = format!("sqlite://{}?mode=rwc", path_str);

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to connect to DB: {}", e)))?;

        Self::bootstrap(&pool).await?;

        debug!(path = ?db_path, "Initialized key-value store");

        Ok(Self { pool })
    }

    /// Create an in-memory store (for testing)
    ///
    /// The pool is pinned to a single connection: each SQLite `:memory:`
    /// connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to connect to DB: {}", e)))?;

        Self::bootstrap(&pool).await?;

        Ok(Self { pool })
    }

    async fn bootstrap(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| BridgeError::Storage(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    /// Get the current Unix timestamp
    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Self::now())
        .execute(&self.pool)
        .await
        .map_err(|e| BridgeError::Storage(format!("Failed to set key: {}", e)))?;

        debug!(key = key, "Stored value");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to get key: {}", e)))?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to delete key: {}", e)))?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM kv ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to list keys: {}", e)))?;

        Ok(rows.iter().map(|r| r.get::<String, _>("key")).collect())
    }

    async fn clear_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM kv")
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to clear store: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_round_trip() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();

        store.set("token", "abc123").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), Some("abc123".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();

        store.set("token", "first").await.unwrap();
        store.set("token", "second").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();

        store.set("token", "abc").await.unwrap();
        store.delete("token").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);

        // Deleting again succeeds
        store.delete("token").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_and_clear() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();

        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["a", "b"]);

        store.clear_all().await.unwrap();
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_has_key() {
        let store = SqliteKeyValueStore::in_memory().await.unwrap();

        assert!(!store.has_key("token").await.unwrap());
        store.set("token", "abc").await.unwrap();
        assert!(store.has_key("token").await.unwrap());
    }
}
