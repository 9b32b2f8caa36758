//! # Session Orchestrator
//!
//! Sequences identity-provider calls with backend verification calls
//! and decides what to persist or clear locally.
//!
//! ## Overview
//!
//! Four operations, each a linear await-sequence with no retries:
//!
//! - `sign_up` - create the provider account, bridge it to the backend,
//!   persist the session token. A backend rejection rolls the provider
//!   account back.
//! - `sign_in` - open a provider session, verify it with the backend,
//!   persist the token. No rollback, no storage change on failure.
//! - `current_user` - point-in-time session lookup; never errors.
//! - `sign_out` - close the provider session and drop the persisted
//!   token; never errors.
//!
//! All collaborators arrive as injected trait objects, so the
//! orchestrator runs identically against production adapters and
//! scripted substitutes.
//!
//! ## Usage
//!
//! ```ignore
//! use core_auth::{Credentials, SessionOrchestrator};
//!
//! let orchestrator = SessionOrchestrator::from_config(&config);
//!
//! let response = orchestrator
//!     .sign_up(Credentials::new("a@x.com", "secret").with_name("A"))
//!     .await?;
//! println!("signed up: {:?}", response.user);
//! ```

use crate::api::{ApiError, AuthApiClient};
use crate::error::{AuthError, Result};
use crate::session_store::SessionStore;
use crate::types::{AuthResponse, Credentials, SessionToken, UserProfile};
use bridge_traits::http::HttpClient;
use bridge_traits::identity::IdentityProvider;
use bridge_traits::storage::KeyValueStore;
use core_runtime::config::{ApiConfig, CoreConfig};
use core_runtime::events::{AuthEvent, EventBus};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Error message when a signup fails without a backend-authored message.
const SIGNUP_FALLBACK: &str = "Signup failed";

/// Error message when a login fails without a backend-authored message.
const LOGIN_FALLBACK: &str = "Login failed";

/// Orchestrates provider and backend calls and manages the persisted
/// session.
pub struct SessionOrchestrator {
    provider: Arc<dyn IdentityProvider>,
    api: AuthApiClient,
    sessions: SessionStore,
    event_bus: EventBus,
}

impl SessionOrchestrator {
    /// Creates a new orchestrator from explicit dependencies.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        http_client: Arc<dyn HttpClient>,
        kv_store: Arc<dyn KeyValueStore>,
        api: ApiConfig,
        event_bus: EventBus,
    ) -> Self {
        Self {
            provider,
            api: AuthApiClient::new(http_client, api),
            sessions: SessionStore::new(kv_store),
            event_bus,
        }
    }

    /// Creates an orchestrator from a validated [`CoreConfig`].
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            config.identity_provider.clone(),
            config.http_client.clone(),
            config.kv_store.clone(),
            config.api.clone(),
            EventBus::new(config.event_buffer),
        )
    }

    /// The auth event bus; hosts subscribe here for state changes.
    pub fn events(&self) -> &EventBus {
        &self.event_bus
    }

    fn emit(&self, event: AuthEvent) {
        // No subscribers is fine
        let _ = self.event_bus.emit(event);
    }

    fn signup_failure(&self, message: String) -> AuthError {
        self.emit(AuthEvent::AuthError {
            message: message.clone(),
        });
        AuthError::signup(message)
    }

    fn login_failure(&self, message: String) -> AuthError {
        self.emit(AuthEvent::AuthError {
            message: message.clone(),
        });
        AuthError::login(message)
    }

    /// Create an account with the provider, register it with the
    /// backend, and persist the session token.
    ///
    /// On a backend rejection (non-2xx) the just-created provider
    /// account is deleted before the error is returned, so no orphaned
    /// provider account remains. The returned error always carries the
    /// backend's message when one exists.
    ///
    /// # Errors
    ///
    /// `AuthError::Signup` for every failure in the sequence.
    #[instrument(skip_all)]
    pub async fn sign_up(&self, credentials: Credentials) -> Result<AuthResponse> {
        let credentials = credentials.normalized();
        let name = credentials.name.clone().unwrap_or_default();

        info!("Starting signup");

        if let Err(e) = self
            .provider
            .create_account(&credentials.email, &credentials.password)
            .await
        {
            warn!(error = %e, "Provider account creation failed");
            return Err(self.signup_failure(e.to_string()));
        }

        let token = match self.provider.session_token().await {
            Ok(token) => SessionToken::new(token),
            Err(e) => {
                warn!(error = %e, "Could not read session token after account creation");
                return Err(self.signup_failure(e.to_string()));
            }
        };

        let user = match self
            .api
            .signup(&name, &credentials.email, &credentials.password)
            .await
        {
            Ok(user) => user,
            Err(ApiError::Status { status, message }) => {
                warn!(status, "Backend rejected signup, rolling back provider account");
                // The error keeps the backend's message even if rollback fails
                if let Err(delete_error) = self.provider.delete_account().await {
                    warn!(error = %delete_error, "Failed to roll back provider account");
                }
                return Err(self
                    .signup_failure(message.unwrap_or_else(|| SIGNUP_FALLBACK.to_string())));
            }
            Err(e) => {
                warn!(error = %e, "Backend signup call failed");
                return Err(self.signup_failure(e.to_string()));
            }
        };

        if let Err(e) = self.sessions.persist(&token).await {
            warn!(error = %e, "Failed to persist session after signup");
            return Err(self.signup_failure(e.to_string()));
        }

        info!("Signup completed");
        self.emit(AuthEvent::SignedUp {
            email: credentials.email,
        });

        Ok(AuthResponse { token, user })
    }

    /// Open a provider session, verify it with the backend, and persist
    /// the session token.
    ///
    /// A failed login leaves previously stored session state untouched.
    ///
    /// # Errors
    ///
    /// `AuthError::Login` for every failure in the sequence.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, credentials: Credentials) -> Result<AuthResponse> {
        let credentials = credentials.normalized();

        info!("Starting login");

        if let Err(e) = self
            .provider
            .sign_in(&credentials.email, &credentials.password)
            .await
        {
            warn!(error = %e, "Provider sign-in failed");
            return Err(self.login_failure(e.to_string()));
        }

        let token = match self.provider.session_token().await {
            Ok(token) => SessionToken::new(token),
            Err(e) => {
                warn!(error = %e, "Could not read session token after sign-in");
                return Err(self.login_failure(e.to_string()));
            }
        };

        let user = match self.api.login(&credentials.email, &token).await {
            Ok(user) => user,
            Err(ApiError::Status { status, message }) => {
                warn!(status, "Backend rejected login");
                return Err(
                    self.login_failure(message.unwrap_or_else(|| LOGIN_FALLBACK.to_string()))
                );
            }
            Err(e) => {
                warn!(error = %e, "Backend login call failed");
                return Err(self.login_failure(e.to_string()));
            }
        };

        if let Err(e) = self.sessions.persist(&token).await {
            warn!(error = %e, "Failed to persist session after login");
            return Err(self.login_failure(e.to_string()));
        }

        info!("Login completed");
        self.emit(AuthEvent::SignedIn {
            email: credentials.email,
        });

        Ok(AuthResponse { token, user })
    }

    /// Point-in-time lookup of the current user.
    ///
    /// Resolves `None` instead of erroring: an unknown session is not
    /// exceptional for callers. A backend rejection of the current token
    /// clears the persisted session; transport failures leave it alone.
    #[instrument(skip_all)]
    pub async fn current_user(&self) -> Option<UserProfile> {
        // One observation of the provider's session stream; the
        // subscription ends with it.
        let state = self.provider.subscribe().current();
        if !state.is_signed_in() {
            debug!("No active provider session");
            return None;
        }

        let token = match self.provider.session_token().await {
            Ok(token) => SessionToken::new(token),
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                return None;
            }
        };

        match self.api.me(&token).await {
            Ok(user) => Some(user),
            Err(ApiError::Status { status, .. }) => {
                warn!(status, "Backend rejected session token, clearing stored session");
                if let Err(e) = self.sessions.clear().await {
                    warn!(error = %e, "Failed to clear stored session");
                }
                self.emit(AuthEvent::SessionInvalidated);
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch current user");
                None
            }
        }
    }

    /// Close the provider session and drop the persisted token.
    ///
    /// Never errors: an already-closed session is not exceptional.
    /// Storage is cleared even when the provider sign-out fails.
    #[instrument(skip_all)]
    pub async fn sign_out(&self) {
        if let Err(e) = self.provider.sign_out().await {
            warn!(error = %e, "Provider sign-out failed");
        }

        if let Err(e) = self.sessions.clear().await {
            warn!(error = %e, "Failed to clear stored session");
        }

        self.emit(AuthEvent::SignedOut);
        info!("Signed out");
    }
}
