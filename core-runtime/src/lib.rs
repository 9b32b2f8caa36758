//! # Core Runtime
//!
//! Runtime plumbing shared by the session orchestration core:
//!
//! - [`config`] - Explicit dependency injection via `CoreConfig` builder
//! - [`events`] - Auth event bus over `tokio::sync::broadcast`
//! - [`logging`] - `tracing-subscriber` setup
//! - [`error`] - Runtime error type

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{ApiConfig, CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
pub use events::{AuthEvent, EventBus};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
