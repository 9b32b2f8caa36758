//! # Core Configuration Module
//!
//! Builder-pattern configuration for the session orchestration core.
//!
//! ## Overview
//!
//! `CoreConfig` holds every dependency the core needs: the identity
//! provider client, the HTTP transport used for backend calls, and the
//! local key-value store. Nothing is module-global; hosts construct the
//! dependencies explicitly and inject them here, which keeps the
//! orchestrator testable against substitute implementations.
//!
//! `build()` validates fail-fast: a missing capability is reported with
//! an actionable message instead of surfacing later as a panic deep in
//! an operation.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{ApiConfig, CoreConfig};
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .api(ApiConfig::from_env()?)
//!     .http_client(Arc::new(ReqwestHttpClient::new()))
//!     .identity_provider(Arc::new(firebase_client))
//!     .kv_store(Arc::new(kv_store))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{HttpClient, IdentityProvider, KeyValueStore};
use std::sync::Arc;
use url::Url;

/// Default backend auth API base URL (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/auth";

/// Environment variable overriding the backend auth API base URL.
pub const API_URL_ENV: &str = "AUTH_API_URL";

/// Backend auth API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the backend auth API; endpoint paths are appended
    /// to it.
    pub base_url: Url,
}

impl ApiConfig {
    /// Create a config for the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Parse a config from a base URL string.
    pub fn parse(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        Ok(Self::new(url))
    }

    /// Read the base URL from `AUTH_API_URL`, falling back to the local
    /// development default.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_URL_ENV) {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
        }
    }
}

/// Core configuration for the session orchestration library.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Backend auth API configuration
    pub api: ApiConfig,

    /// HTTP client for backend API requests (required)
    pub http_client: Arc<dyn HttpClient>,

    /// External identity provider client (required)
    pub identity_provider: Arc<dyn IdentityProvider>,

    /// Durable key-value storage for the persisted session (required)
    pub kv_store: Arc<dyn KeyValueStore>,

    /// Buffer size for the auth event bus
    pub event_buffer: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api", &self.api)
            .field("http_client", &"HttpClient { ... }")
            .field("identity_provider", &"IdentityProvider { ... }")
            .field("kv_store", &"KeyValueStore { ... }")
            .field("event_buffer", &self.event_buffer)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Builder for [`CoreConfig`].
#[derive(Default)]
pub struct CoreConfigBuilder {
    api: Option<ApiConfig>,
    http_client: Option<Arc<dyn HttpClient>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    kv_store: Option<Arc<dyn KeyValueStore>>,
    event_buffer: Option<usize>,
}

impl CoreConfigBuilder {
    /// Set the backend API configuration (defaults to the local
    /// development endpoint).
    pub fn api(mut self, api: ApiConfig) -> Self {
        self.api = Some(api);
        self
    }

    /// Inject the HTTP client used for backend calls.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Inject the identity provider client.
    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    /// Inject the durable key-value store.
    pub fn kv_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.kv_store = Some(store);
        self
    }

    /// Set the auth event bus buffer size.
    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = Some(capacity);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapabilityMissing` when a required dependency was
    /// not injected, and `Error::Config` for invalid settings.
    pub fn build(self) -> Result<CoreConfig> {
        let http_client = self.http_client.ok_or_else(|| Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "No HTTP client provided. \
                      Desktop: inject bridge_desktop::ReqwestHttpClient. \
                      Tests: inject a scripted mock."
                .to_string(),
        })?;

        let identity_provider = self
            .identity_provider
            .ok_or_else(|| Error::CapabilityMissing {
                capability: "IdentityProvider".to_string(),
                message: "No identity provider provided. \
                          Inject provider_firebase::FirebaseAuthClient or a substitute."
                    .to_string(),
            })?;

        let kv_store = self.kv_store.ok_or_else(|| Error::CapabilityMissing {
            capability: "KeyValueStore".to_string(),
            message: "No key-value store provided. \
                      Desktop: inject bridge_desktop::SqliteKeyValueStore. \
                      Tests: inject SqliteKeyValueStore::in_memory()."
                .to_string(),
        })?;

        let event_buffer = self.event_buffer.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        if event_buffer == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(CoreConfig {
            api: self.api.unwrap_or_default(),
            http_client,
            identity_provider,
            kv_store,
            event_buffer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use bridge_traits::identity::{SessionState, SessionWatcher};
    use tokio::sync::watch;

    struct StubHttpClient;

    #[async_trait]
    impl HttpClient for StubHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Err(BridgeError::OperationFailed("stub".to_string()))
        }
    }

    struct StubProvider {
        state: watch::Sender<SessionState>,
    }

    impl StubProvider {
        fn new() -> Self {
            let (state, _) = watch::channel(SessionState::SignedOut);
            Self { state }
        }
    }

    #[async_trait]
    impl IdentityProvider for StubProvider {
        async fn create_account(&self, _email: &str, _password: &str) -> BridgeResult<()> {
            Ok(())
        }
        async fn sign_in(&self, _email: &str, _password: &str) -> BridgeResult<()> {
            Ok(())
        }
        async fn sign_out(&self) -> BridgeResult<()> {
            Ok(())
        }
        async fn session_token(&self) -> BridgeResult<String> {
            Err(BridgeError::NotAvailable("no session".to_string()))
        }
        async fn delete_account(&self) -> BridgeResult<()> {
            Ok(())
        }
        fn subscribe(&self) -> SessionWatcher {
            SessionWatcher::new(self.state.subscribe())
        }
    }

    struct StubStore;

    #[async_trait]
    impl KeyValueStore for StubStore {
        async fn set(&self, _key: &str, _value: &str) -> BridgeResult<()> {
            Ok(())
        }
        async fn get(&self, _key: &str) -> BridgeResult<Option<String>> {
            Ok(None)
        }
        async fn delete(&self, _key: &str) -> BridgeResult<()> {
            Ok(())
        }
        async fn list_keys(&self) -> BridgeResult<Vec<String>> {
            Ok(vec![])
        }
        async fn clear_all(&self) -> BridgeResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_api_config_default() {
        let api = ApiConfig::default();
        assert_eq!(api.base_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_api_config_parse_invalid() {
        let result = ApiConfig::parse("not a url");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_fails_without_http_client() {
        let result = CoreConfig::builder()
            .identity_provider(Arc::new(StubProvider::new()))
            .kv_store(Arc::new(StubStore))
            .build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "HttpClient");
            }
            other => panic!("Expected CapabilityMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_builder_fails_without_provider() {
        let result = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .kv_store(Arc::new(StubStore))
            .build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "IdentityProvider");
            }
            other => panic!("Expected CapabilityMissing, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_builder_succeeds_with_all_capabilities() {
        let config = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .identity_provider(Arc::new(StubProvider::new()))
            .kv_store(Arc::new(StubStore))
            .event_buffer(16)
            .build()
            .unwrap();

        assert_eq!(config.event_buffer, 16);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_builder_rejects_zero_event_buffer() {
        let result = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .identity_provider(Arc::new(StubProvider::new()))
            .kv_store(Arc::new(StubStore))
            .event_buffer(0)
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
