//! # Host Bridge Traits
//!
//! Capability traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the session-orchestration
//! core and everything outside it. Each trait represents a capability
//! the core requires but that is supplied differently per host:
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP transport
//! - [`KeyValueStore`](storage::KeyValueStore) - Durable key-value persistence
//! - [`IdentityProvider`](identity::IdentityProvider) - External authentication
//!   service issuing session tokens
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Adapters
//! convert their native errors into it and keep the messages actionable.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be
//! shared across async tasks behind `Arc`.

pub mod error;
pub mod http;
pub mod identity;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use identity::{IdentityProvider, SessionState, SessionWatcher};
pub use storage::KeyValueStore;
