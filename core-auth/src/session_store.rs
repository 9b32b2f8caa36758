//! Persisted Session Handling
//!
//! Writes the provider-issued session token to durable local storage so
//! a session survives restarts, and clears it when the session ends.
//!
//! The token is kept under two keys. Earlier releases read it under
//! different names; both are written and removed in lockstep so any
//! reader finds the same value. Token values are never logged.

use crate::error::AuthError;
use crate::types::SessionToken;
use bridge_traits::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Storage key carried over from the provider-named era.
pub const PROVIDER_TOKEN_KEY: &str = "firebaseToken";

/// Storage key used by current readers.
pub const SESSION_TOKEN_KEY: &str = "token";

/// Durable storage for the active session token.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        debug!("Initializing SessionStore");
        Self { store }
    }

    /// Persist the token under both keys.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StorageUnavailable` when the underlying store
    /// fails; the keys may then be out of lockstep until the next
    /// successful `persist` or `clear`.
    pub async fn persist(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.store
            .set(PROVIDER_TOKEN_KEY, token.as_str())
            .await
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;
        self.store
            .set(SESSION_TOKEN_KEY, token.as_str())
            .await
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;

        info!("Session token persisted");
        Ok(())
    }

    /// Remove both keys. Idempotent.
    pub async fn clear(&self) -> Result<(), AuthError> {
        self.store
            .delete(PROVIDER_TOKEN_KEY)
            .await
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;
        self.store
            .delete(SESSION_TOKEN_KEY)
            .await
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;

        info!("Stored session cleared");
        Ok(())
    }

    /// Read the persisted token, if any.
    pub async fn load(&self) -> Result<Option<SessionToken>, AuthError> {
        let value = self
            .store
            .get(SESSION_TOKEN_KEY)
            .await
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;

        Ok(value.map(SessionToken::new))
    }
}
