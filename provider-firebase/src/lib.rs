//! # Firebase Identity Provider
//!
//! `IdentityProvider` implementation backed by the Firebase Auth
//! (Identity Toolkit) REST API.
//!
//! ## Overview
//!
//! The client covers the account lifecycle the session core needs:
//! password sign-up, password sign-in, sign-out, current-session token
//! retrieval, account deletion, and session-state notifications. All
//! network traffic flows through the injected `HttpClient` bridge.
//!
//! ## Configuration
//!
//! A [`FirebaseConfig`] carries the project's Web API key and project
//! identifier, plus an overridable endpoint for the local emulator.
//! There is no process-global app state; construct a client explicitly
//! and inject it where it is needed.

mod client;
mod error;
mod types;

pub use client::{FirebaseAuthClient, FirebaseConfig, DEFAULT_AUTH_ENDPOINT};
pub use error::{FirebaseError, Result};
pub use types::AuthTokenResponse;
