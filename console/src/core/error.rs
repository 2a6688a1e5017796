//! # Common Error Types
//!
//! Consolidated error handling for the admin console.
//!
//! Every failure a page can hit is one of three kinds as far as the operator is
//! concerned: the backend could not be reached, the backend said no, or the
//! input never made it out of the console. [`AppError`] keeps the finer
//! distinctions for logs and tests, and [`AppError::user_message`] collapses
//! them into the text shown in a notification.
//!
//! ## Error Categories
//!
//! - **Transport**: connection refused, DNS, TLS, timeouts (the underlying `reqwest::Error`)
//! - **Server / Unauthorized**: non-2xx status, with the backend's `detail` when it sent one
//! - **Decode**: a 2xx body that does not have the expected shape
//! - **Session**: reading or writing the persisted session failed
//! - **Validation**: input rejected before any request was sent
//! - **Config**: bad environment or CLI configuration
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use admin_console::core::error::AppError;
//!
//! let err = AppError::Server { status: 422, detail: Some("Amount exceeds limit".to_string()) };
//! assert_eq!(err.user_message("Failed to update settings"), "Amount exceeds limit");
//!
//! let err = AppError::Decode("expected object".to_string());
//! assert_eq!(err.user_message("Failed to fetch users"), "Failed to fetch users");
//! ```

use thiserror::Error;

/// Console-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Server error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    /// The backend answered 401; the local session has been cleared.
    #[error("Not authenticated: {}", .detail.as_deref().unwrap_or("session expired"))]
    Unauthorized { detail: Option<String> },

    /// A success response could not be parsed.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Session persistence failed.
    #[error("Session storage error: {0}")]
    Session(String),

    /// Input rejected locally.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Text for a notification: the server's detail or local validation
    /// message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Server {
                detail: Some(detail),
                ..
            }
            | AppError::Unauthorized {
                detail: Some(detail),
            } if !detail.is_empty() => detail.clone(),
            AppError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// True for 401 responses
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }

    /// HTTP status if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Server { status, .. } => Some(*status),
            AppError::Unauthorized { .. } => Some(401),
            AppError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Session(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<shared::EnvelopeError> for AppError {
    fn from(err: shared::EnvelopeError) -> Self {
        AppError::Decode(err.to_string())
    }
}
