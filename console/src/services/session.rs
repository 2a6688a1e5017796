//! # Admin Session
//!
//! The session is the only state the console persists: the bearer token and
//! the cached admin profile. It is an explicit value owned by the
//! [`ApiClient`](crate::services::api::ApiClient) and backed by a
//! [`SessionStore`]; nothing else reads or writes the store.
//!
//! ## Stores
//!
//! - [`FileSessionStore`]: JSON file on disk (`{"token": ..., "profile": ...}`)
//! - [`MemorySessionStore`]: process-local, for tests and one-shot tooling
//!
//! Both entries are always cleared together.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::AdminProfile;

use crate::core::error::Result;

/// Bearer token plus cached profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AdminProfile>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.profile.is_none()
    }
}

/// Durable key/value home of the session
pub trait SessionStore: Send + Sync {
    /// Read the persisted session (empty when nothing is stored)
    fn load(&self) -> Result<Session>;

    fn store_token(&self, token: &str) -> Result<()>;

    fn store_profile(&self, profile: &AdminProfile) -> Result<()>;

    /// Remove token and profile together
    fn clear(&self) -> Result<()>;
}

/// Session kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(session),
            Err(e) => {
                // A corrupt file is treated as logged out rather than blocking startup
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(Session::default())
            }
        }
    }

    fn store_token(&self, token: &str) -> Result<()> {
        let mut session = self.load()?;
        session.token = Some(token.to_string());
        self.write(&session)
    }

    fn store_profile(&self, profile: &AdminProfile) -> Result<()> {
        let mut session = self.load()?;
        session.profile = Some(profile.clone());
        self.write(&session)
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session kept in memory only
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session> {
        Ok(self.inner.lock().clone())
    }

    fn store_token(&self, token: &str) -> Result<()> {
        self.inner.lock().token = Some(token.to_string());
        Ok(())
    }

    fn store_profile(&self, profile: &AdminProfile) -> Result<()> {
        self.inner.lock().profile = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.lock() = Session::default();
        Ok(())
    }
}
