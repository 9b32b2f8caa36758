//! Firebase Auth REST client
//!
//! Implements the `IdentityProvider` trait against the Identity Toolkit
//! REST API, the surface beneath the official Firebase Auth SDKs. All
//! HTTP goes through the injected `HttpClient`, so the client runs
//! unchanged against the live service, the emulator, or a scripted
//! transport in tests.

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::identity::{IdentityProvider, SessionState, SessionWatcher};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::error::{describe_error_code, FirebaseError, Result};
use crate::types::{AuthTokenResponse, DeleteAccountRequest, FirebaseErrorBody, PasswordCredentials};

/// Identity Toolkit API base URL
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

/// Firebase project configuration
///
/// Supplied externally (host config or environment); the client never
/// reads globals on its own behalf beyond [`FirebaseConfig::from_env`].
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project
    pub api_key: String,
    /// Firebase project identifier
    pub project_id: String,
    /// Identity Toolkit endpoint; override to point at the emulator
    pub endpoint: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different Identity Toolkit endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Read configuration from `FIREBASE_API_KEY` and
    /// `FIREBASE_PROJECT_ID`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FIREBASE_API_KEY")
            .map_err(|_| FirebaseError::Config("FIREBASE_API_KEY is not set".to_string()))?;
        let project_id = std::env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| FirebaseError::Config("FIREBASE_PROJECT_ID is not set".to_string()))?;
        Ok(Self::new(api_key, project_id))
    }
}

/// The currently open provider session.
struct FirebaseSession {
    id_token: String,
    refresh_token: String,
    local_id: String,
    expires_at: DateTime<Utc>,
}

// Tokens are never exposed through Debug.
impl std::fmt::Debug for FirebaseSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseSession")
            .field("id_token", &"[REDACTED]")
            .field("has_refresh_token", &!self.refresh_token.is_empty())
            .field("local_id", &self.local_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Firebase-backed identity provider client
///
/// Holds at most one open session. Session-state transitions are
/// published over a watch channel so subscribers observe the current
/// state immediately.
pub struct FirebaseAuthClient {
    config: FirebaseConfig,
    http_client: Arc<dyn HttpClient>,
    session: RwLock<Option<FirebaseSession>>,
    state: watch::Sender<SessionState>,
}

impl FirebaseAuthClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `config` - Firebase project configuration
    /// * `http_client` - HTTP transport implementation
    pub fn new(config: FirebaseConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let (state, _) = watch::channel(SessionState::SignedOut);
        Self {
            config,
            http_client,
            session: RwLock::new(None),
            state,
        }
    }

    fn op_url(&self, op: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.config.endpoint.trim_end_matches('/'),
            op,
            self.config.api_key
        )
    }

    fn map_api_error(response: &HttpResponse) -> FirebaseError {
        match response.json::<FirebaseErrorBody>() {
            Ok(body) => FirebaseError::ApiError {
                status_code: response.status,
                message: describe_error_code(&body.error.message),
            },
            Err(_) => FirebaseError::ApiError {
                status_code: response.status,
                message: format!("Firebase endpoint returned status {}", response.status),
            },
        }
    }

    async fn call_credentials_endpoint(
        &self,
        op: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthTokenResponse> {
        let request = HttpRequest::new(HttpMethod::Post, self.op_url(op))
            .json(&PasswordCredentials::new(email, password))
            .map_err(|e| FirebaseError::ParseError(e.to_string()))?;

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| FirebaseError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            let error = Self::map_api_error(&response);
            warn!(status = response.status, op = op, "Firebase call rejected");
            return Err(error);
        }

        response
            .json::<AuthTokenResponse>()
            .map_err(|e| FirebaseError::ParseError(e.to_string()))
    }

    async fn open_session(&self, tokens: AuthTokenResponse) {
        let expires_at = Utc::now() + chrono::Duration::seconds(tokens.expires_in_seconds());
        {
            let mut session = self.session.write().await;
            *session = Some(FirebaseSession {
                id_token: tokens.id_token,
                refresh_token: tokens.refresh_token,
                local_id: tokens.local_id,
                expires_at,
            });
        }
        // send_replace keeps the state current even with no subscribers
        self.state.send_replace(SessionState::SignedIn);
    }

    async fn close_session(&self) {
        {
            let mut session = self.session.write().await;
            *session = None;
        }
        self.state.send_replace(SessionState::SignedOut);
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    #[instrument(skip_all)]
    async fn create_account(&self, email: &str, password: &str) -> BridgeResult<()> {
        debug!("Creating provider account");
        let tokens = self
            .call_credentials_endpoint("signUp", email, password)
            .await?;

        info!(local_id = %tokens.local_id, "Provider account created");
        self.open_session(tokens).await;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn sign_in(&self, email: &str, password: &str) -> BridgeResult<()> {
        debug!("Signing in with password");
        let tokens = self
            .call_credentials_endpoint("signInWithPassword", email, password)
            .await?;

        info!(local_id = %tokens.local_id, "Provider sign-in succeeded");
        self.open_session(tokens).await;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn sign_out(&self) -> BridgeResult<()> {
        // Identity Toolkit sessions are client-held; signing out is a
        // local state transition.
        self.close_session().await;
        debug!("Provider session closed");
        Ok(())
    }

    async fn session_token(&self) -> BridgeResult<String> {
        let session = self.session.read().await;
        let session = session.as_ref().ok_or(FirebaseError::NotSignedIn)?;

        if session.expires_at <= Utc::now() {
            debug!(
                local_id = %session.local_id,
                "Session token is past its provider-issued lifetime"
            );
        }

        Ok(session.id_token.clone())
    }

    #[instrument(skip_all)]
    async fn delete_account(&self) -> BridgeResult<()> {
        let id_token = {
            let session = self.session.read().await;
            session
                .as_ref()
                .ok_or(FirebaseError::NotSignedIn)?
                .id_token
                .clone()
        };

        let request = HttpRequest::new(HttpMethod::Post, self.op_url("delete"))
            .json(&DeleteAccountRequest { id_token })
            .map_err(|e| FirebaseError::ParseError(e.to_string()))?;

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| FirebaseError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            return Err(BridgeError::from(Self::map_api_error(&response)));
        }

        info!("Provider account deleted");
        self.close_session().await;
        Ok(())
    }

    fn subscribe(&self) -> SessionWatcher {
        SessionWatcher::new(self.state.subscribe())
    }
}
