//! # Console Configuration
//!
//! Loaded from environment variables (a `.env` file is honoured by the
//! binary) and validated before anything connects. CLI flags override
//! individual fields after loading.
//!
//! | Variable                   | Default                                  |
//! |----------------------------|------------------------------------------|
//! | `ADMIN_API_URL`            | `http://127.0.0.1:8000/api`              |
//! | `ADMIN_SESSION_FILE`       | `$HOME/.admin-console/session.json`      |
//! | `ADMIN_HTTP_TIMEOUT_SECS`  | unset (no timeout)                       |
//! | `ADMIN_PAGE_SIZE`          | `20`                                     |
//! | `ADMIN_LOG_DIR`            | unset (no file logging)                  |
//! | `RUST_LOG`                 | `admin_console=info,warn`                |

use std::path::PathBuf;
use std::time::Duration;

use shared::DEFAULT_PAGE_SIZE;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_LOG_LEVEL: &str = "admin_console=info,warn";

/// Largest page size the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// API base URL; admin routes live under `{api_url}/admin`
    pub api_url: String,
    /// Where the token and profile are persisted
    pub session_file: PathBuf,
    /// Per-request timeout, `None` for no timeout
    pub http_timeout: Option<Duration>,
    pub page_size: u32,
    /// Daily-rotated log files go here when set
    pub log_dir: Option<PathBuf>,
    /// `EnvFilter` directive
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(".admin-console").join("session.json"),
            http_timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
            log_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_url = get("ADMIN_API_URL").unwrap_or(defaults.api_url);

        let session_file = match (get("ADMIN_SESSION_FILE"), get("HOME")) {
            (Some(path), _) => PathBuf::from(path),
            (None, Some(home)) => PathBuf::from(home).join(".admin-console").join("session.json"),
            (None, None) => defaults.session_file,
        };

        let http_timeout = get("ADMIN_HTTP_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    AppError::Config(format!("ADMIN_HTTP_TIMEOUT_SECS must be a whole number of seconds: {}", e))
                })
            })
            .transpose()?;

        let page_size = get("ADMIN_PAGE_SIZE")
            .map(|v| {
                v.parse::<u32>()
                    .map_err(|e| AppError::Config(format!("ADMIN_PAGE_SIZE must be a valid number: {}", e)))
            })
            .transpose()?
            .unwrap_or(defaults.page_size);

        Ok(Self {
            api_url,
            session_file,
            http_timeout,
            page_size,
            log_dir: get("ADMIN_LOG_DIR").map(PathBuf::from),
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    /// Validate configuration values before any client is built.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "ADMIN_API_URL must start with http:// or https:// (got {})",
                self.api_url
            )));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::Config(format!(
                "ADMIN_PAGE_SIZE must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.http_timeout == Some(Duration::ZERO) {
            return Err(AppError::Config("ADMIN_HTTP_TIMEOUT_SECS must be greater than 0".to_string()));
        }

        if self.session_file.as_os_str().is_empty() {
            return Err(AppError::Config("ADMIN_SESSION_FILE must not be empty".to_string()));
        }

        Ok(())
    }
}
