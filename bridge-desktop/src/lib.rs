//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations of the bridge
//! traits using desktop-appropriate libraries:
//! - `HttpClient` using `reqwest`
//! - `KeyValueStore` using a SQLite-backed store
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, SqliteKeyValueStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http_client = ReqwestHttpClient::new();
//!     let store = SqliteKeyValueStore::new("auth.db".into()).await.unwrap();
//!
//!     // Use in core configuration
//! }
//! ```

mod http;
mod storage;

pub use http::ReqwestHttpClient;
pub use storage::SqliteKeyValueStore;
