//! Local Persistence Abstraction
//!
//! Key-value storage that survives process restarts. Platform adapters
//! back this with whatever the host offers:
//! - Desktop: SQLite-backed store
//! - Mobile: UserDefaults / SharedPreferences
//! - Web: localStorage
//!
//! Values are plain strings; callers serialize anything richer
//! themselves.

use async_trait::async_trait;

use crate::error::Result;

/// Durable key-value storage trait
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::KeyValueStore;
///
/// async fn remember(store: &dyn KeyValueStore, token: &str) -> Result<()> {
///     store.set("token", token).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store a value, overwriting any previous value for the key.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve a value.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete a key. Idempotent: deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists without retrieving it.
    async fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// List all stored keys.
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Remove every stored key.
    async fn clear_all(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MapStore {
        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        async fn list_keys(&self) -> Result<Vec<String>> {
            Ok(self.entries.lock().unwrap().keys().cloned().collect())
        }

        async fn clear_all(&self) -> Result<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_has_key_default_impl() {
        let store = MapStore {
            entries: Mutex::new(HashMap::new()),
        };

        assert!(!store.has_key("token").await.unwrap());
        store.set("token", "abc").await.unwrap();
        assert!(store.has_key("token").await.unwrap());
        store.delete("token").await.unwrap();
        assert!(!store.has_key("token").await.unwrap());
    }
}
