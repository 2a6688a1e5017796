//! # Notifications
//!
//! Transient, dismissible messages raised by page controllers. Controllers
//! hold a cloneable [`Notifier`]; the front end drains the
//! [`NotificationCenter`] each tick and renders whatever arrived.

use async_channel::{unbounded, Receiver, Sender};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Sending half handed to controllers
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<Notification>,
}

impl Notifier {
    fn push(&self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification {
            level,
            message: message.into(),
        };
        tracing::debug!(level = level.label(), message = %notification.message, "Notification");
        // Unbounded; only fails once the center is gone, and then nobody is looking
        let _ = self.tx.try_send(notification);
    }

    /// Show a success notification
    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    /// Show an error notification
    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }
}

/// Receiving half owned by the front end
#[derive(Debug)]
pub struct NotificationCenter {
    tx: Sender<Notification>,
    rx: Receiver<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifier(&self) -> Notifier {
        Notifier { tx: self.tx.clone() }
    }

    /// Take everything queued so far (non-blocking)
    pub fn drain(&self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(notification) = self.rx.try_recv() {
            out.push(notification);
        }
        out
    }
}
