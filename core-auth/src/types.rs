//! Domain types for the session orchestration core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sign-up / sign-in credentials.
///
/// Transient: credentials are never persisted. The email is normalized
/// (lowercased, trimmed) before any provider or backend call.
///
/// # Examples
///
/// ```
/// use core_auth::Credentials;
///
/// let credentials = Credentials::new("A@X.com", "p1").with_name("A");
/// let normalized = credentials.normalized();
/// assert_eq!(normalized.email, "a@x.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    /// Display name, used by sign-up only
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Normalize the email: lowercase and trim surrounding whitespace.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self
    }
}

// Passwords never reach logs through Debug.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Opaque session token issued by the identity provider.
///
/// The orchestrator never interprets the token; its validity lifetime
/// is owned and enforced by the provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Token values never reach logs through Debug.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

/// Backend-owned user profile.
///
/// The orchestrator never mutates the profile; `name` and `email` are
/// typed for convenience and every other field the backend sends is
/// carried through `extra`, so the record reaches the caller as the
/// backend returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Resolved value of a successful sign-up or sign-in.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub token: SessionToken,
    pub user: UserProfile,
}
