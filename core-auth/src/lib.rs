//! # Session Orchestration Core
//!
//! Client-side authentication façade: drives an external identity
//! provider, bridges the provider-issued session token to the
//! application backend, and persists the active session locally.
//!
//! ## Overview
//!
//! The [`SessionOrchestrator`] exposes the four operations a host UI
//! needs - sign-up, sign-in, current-user lookup, sign-out - and owns
//! the sequencing between the provider, the backend auth API, and local
//! storage, including the rollback of a provider account when the
//! backend rejects a signup.
//!
//! Collaborators are injected through the `bridge-traits` seams, so the
//! whole crate is exercised in tests with scripted substitutes.

pub mod api;
pub mod error;
pub mod orchestrator;
pub mod session_store;
pub mod types;

pub use api::{ApiError, AuthApiClient};
pub use error::{AuthError, Result};
pub use orchestrator::SessionOrchestrator;
pub use session_store::{SessionStore, PROVIDER_TOKEN_KEY, SESSION_TOKEN_KEY};
pub use types::{AuthResponse, Credentials, SessionToken, UserProfile};
