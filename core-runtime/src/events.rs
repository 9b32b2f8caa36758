//! # Auth Event Bus
//!
//! Broadcast channel for authentication state changes, built on
//! `tokio::sync::broadcast`. The orchestrator publishes; any number of
//! host subscribers (UI, analytics) listen independently.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{AuthEvent, EventBus};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut subscriber = event_bus.subscribe();
//!
//! event_bus
//!     .emit(AuthEvent::SignedIn { email: "user@example.com".to_string() })
//!     .ok();
//!
//! assert!(matches!(
//!     subscriber.recv().await,
//!     Ok(AuthEvent::SignedIn { .. })
//! ));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - `RecvError::Lagged(n)`: the subscriber missed `n` events; non-fatal.
//! - `RecvError::Closed`: all senders dropped; treat as shutdown.
//!
//! Emitting with no subscribers returns an error; publishers ignore it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Events related to authentication and session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum AuthEvent {
    /// A new account was created and verified with the backend.
    SignedUp {
        /// Normalized (lowercased) account email.
        email: String,
    },
    /// An existing account signed in and was verified with the backend.
    SignedIn {
        /// Normalized (lowercased) account email.
        email: String,
    },
    /// The session ended (explicit sign-out).
    SignedOut,
    /// The backend rejected the current session token; local session
    /// state was cleared.
    SessionInvalidated,
    /// An authentication operation failed.
    AuthError {
        /// Human-readable error message.
        message: String,
    },
}

impl AuthEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            AuthEvent::SignedUp { .. } => "Account created",
            AuthEvent::SignedIn { .. } => "User signed in",
            AuthEvent::SignedOut => "User signed out",
            AuthEvent::SessionInvalidated => "Session rejected by backend",
            AuthEvent::AuthError { .. } => "Authentication error",
        }
    }
}

/// Central event bus for publishing and subscribing to auth events.
///
/// Uses `tokio::sync::broadcast` internally:
/// - Multiple producers (clone the `EventBus`)
/// - Multiple consumers (each `subscribe()` creates a new receiver)
/// - Lagging detection (slow subscribers get `RecvError::Lagged`)
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AuthEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are no active subscribers.
    pub fn emit(&self, event: AuthEvent) -> Result<usize, SendError<AuthEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive future events.
    ///
    /// Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_creation() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);

        // Should error when no subscribers
        assert!(bus.emit(AuthEvent::SignedOut).is_err());
    }

    #[tokio::test]
    async fn test_event_emission_with_subscribers() {
        let bus = EventBus::new(10);
        let mut sub = bus.subscribe();

        let event = AuthEvent::SignedIn {
            email: "user@example.com".to_string(),
        };

        let result = bus.emit(event.clone());
        assert_eq!(result.unwrap(), 1);

        let received = sub.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        bus.emit(AuthEvent::SessionInvalidated).ok();

        assert_eq!(sub1.recv().await.unwrap(), AuthEvent::SessionInvalidated);
        assert_eq!(sub2.recv().await.unwrap(), AuthEvent::SessionInvalidated);
    }

    #[tokio::test]
    async fn test_lagged_subscriber() {
        let bus = EventBus::new(2); // Very small buffer
        let mut sub = bus.subscribe();

        for i in 0..5 {
            bus.emit(AuthEvent::AuthError {
                message: format!("error {}", i),
            })
            .ok();
        }

        // First recv should indicate lagging
        let result = sub.recv().await;
        assert!(matches!(result, Err(RecvError::Lagged(_))));
    }

    #[tokio::test]
    async fn test_event_serialization() {
        let event = AuthEvent::SignedUp {
            email: "user@example.com".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SignedUp"));

        let deserialized: AuthEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_event_description() {
        let event = AuthEvent::SignedIn {
            email: "user@example.com".to_string(),
        };
        assert_eq!(event.description(), "User signed in");
        assert_eq!(AuthEvent::SignedOut.description(), "User signed out");
    }
}
