//! Identity Provider Abstraction
//!
//! The external authentication service that verifies credentials and
//! issues session tokens. The core treats it as a black box: accounts
//! are created and signed in with an email/password pair, and the only
//! thing ever read back is an opaque session token.
//!
//! Session-state notifications are delivered over a `watch` channel so
//! that a new subscriber observes the current state immediately, the
//! same contract as the provider SDKs this trait wraps.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;

/// Point-in-time state of the provider session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No account is signed in.
    #[default]
    SignedOut,
    /// An account is signed in and a session token is available.
    SignedIn,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn)
    }
}

/// One subscription to the provider's session-state notifications.
///
/// `current` consumes the watcher: the state is observed exactly once
/// and the subscription ends when the watcher drops. Callers that need
/// a live stream instead hold the watcher and poll [`changed`].
///
/// [`changed`]: SessionWatcher::changed
pub struct SessionWatcher {
    rx: watch::Receiver<SessionState>,
}

impl SessionWatcher {
    pub fn new(rx: watch::Receiver<SessionState>) -> Self {
        Self { rx }
    }

    /// Observe the session state once, then end the subscription.
    pub fn current(mut self) -> SessionState {
        *self.rx.borrow_and_update()
    }

    /// Wait for the next state change.
    ///
    /// Returns `None` once the provider has been dropped.
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

impl std::fmt::Debug for SessionWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionWatcher")
            .field("state", &*self.rx.borrow())
            .finish()
    }
}

/// External identity provider trait
///
/// Credential verification, token issuance, and token lifetime are all
/// owned by the provider; implementations surface them without
/// interpretation.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new account and open a session for it.
    async fn create_account(&self, email: &str, password: &str) -> Result<()>;

    /// Open a session for an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<()>;

    /// Close the current session.
    async fn sign_out(&self) -> Result<()>;

    /// Session token for the current session.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::NotAvailable` when no session is open.
    async fn session_token(&self) -> Result<String>;

    /// Delete the currently signed-in account at the provider.
    async fn delete_account(&self) -> Result<()>;

    /// Subscribe to session-state notifications.
    ///
    /// The watcher observes the state as of the subscription, not just
    /// future transitions.
    fn subscribe(&self) -> SessionWatcher;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watcher_observes_current_state() {
        let (tx, rx) = watch::channel(SessionState::SignedIn);
        let watcher = SessionWatcher::new(rx);

        assert_eq!(watcher.current(), SessionState::SignedIn);
        drop(tx);
    }

    #[tokio::test]
    async fn test_watcher_observes_latest_state() {
        let (tx, rx) = watch::channel(SessionState::SignedOut);
        tx.send(SessionState::SignedIn).unwrap();

        let watcher = SessionWatcher::new(rx);
        assert_eq!(watcher.current(), SessionState::SignedIn);
    }

    #[tokio::test]
    async fn test_watcher_changed_stream() {
        let (tx, rx) = watch::channel(SessionState::SignedOut);
        let mut watcher = SessionWatcher::new(rx);

        tx.send(SessionState::SignedIn).unwrap();
        assert_eq!(watcher.changed().await, Some(SessionState::SignedIn));

        drop(tx);
        assert_eq!(watcher.changed().await, None);
    }
}
