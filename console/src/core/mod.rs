//! # Core Abstractions
//!
//! Error types and the service trait the rest of the console is written against.
//!
//! - **[`error`]**: [`AppError`] and the crate [`Result`] alias
//! - **[`service`]**: [`AdminApi`], the dependency-injection seam between page
//!   controllers and the HTTP client
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use admin_console::core::AdminApi;
//! use admin_console::services::api::ApiClient;
//! use admin_console::services::session::MemorySessionStore;
//!
//! let store = Arc::new(MemorySessionStore::default());
//! let api: Arc<dyn AdminApi> = Arc::new(ApiClient::new("http://127.0.0.1:8000/api", None, store).unwrap());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::AdminApi;
