//! # Settings Page Controller
//!
//! Holds an editable draft of the platform settings. Edits are coerced per
//! field kind as they are typed; save sends the whole draft in one request;
//! reset asks the caller to confirm first.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{SettingValue, SettingsBundle};

use super::notifications::Notifier;
use crate::core::error::{AppError, Result};
use crate::core::service::AdminApi;

/// Render state of the settings page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsState {
    pub draft: SettingsBundle,
    pub loading: bool,
    pub saving: bool,
    /// True once the draft differs from what was last loaded or saved
    pub dirty: bool,
}

pub struct SettingsController {
    api: Arc<dyn AdminApi>,
    state: Arc<RwLock<SettingsState>>,
    notifier: Notifier,
}

impl SettingsController {
    pub fn new(api: Arc<dyn AdminApi>, notifier: Notifier) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(SettingsState::default())),
            notifier,
        }
    }

    pub fn state(&self) -> Arc<RwLock<SettingsState>> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> SettingsState {
        self.state.read().clone()
    }

    pub async fn mount(&self) {
        self.refresh().await;
    }

    /// Replace the draft with the server's current settings.
    pub async fn refresh(&self) {
        self.state.write().loading = true;

        match self.api.get_settings().await {
            Ok(settings) => {
                let mut state = self.state.write();
                state.draft = settings;
                state.dirty = false;
                state.loading = false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Settings fetch failed");
                self.state.write().loading = false;
                self.notifier.error(e.user_message("Failed to fetch settings"));
            }
        }
    }

    /// Apply a raw text edit to one field and return the stored value
    pub fn update_field(&self, key: &str, raw: &str) -> SettingValue {
        let mut state = self.state.write();
        let value = state.draft.apply_edit(key, raw).clone();
        state.dirty = true;
        value
    }

    /// Validate and send the whole draft. The draft is kept either way.
    pub async fn save(&self) -> Result<()> {
        let draft = {
            let mut state = self.state.write();
            if state.saving {
                return Err(AppError::Validation("A save is already in progress".to_string()));
            }
            if let Err(violations) = state.draft.validate() {
                let message = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                drop(state);
                self.notifier.error(message.clone());
                return Err(AppError::Validation(message));
            }
            state.saving = true;
            state.draft.clone()
        };

        let result = self.api.update_settings(&draft).await;

        let mut state = self.state.write();
        state.saving = false;
        match result {
            Ok(_) => {
                if state.draft == draft {
                    state.dirty = false;
                }
                drop(state);
                self.notifier.success("System settings updated successfully");
                Ok(())
            }
            Err(e) => {
                drop(state);
                tracing::warn!(error = %e, "Settings update failed");
                self.notifier.error(e.user_message("Failed to update settings"));
                Err(e)
            }
        }
    }

    /// Restore server defaults after `confirm` agrees, then reload the draft.
    ///
    /// Returns `Ok(false)` when the operator declined.
    pub async fn reset<F>(&self, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            tracing::debug!("Settings reset declined");
            return Ok(false);
        }

        match self.api.reset_settings().await {
            Ok(_) => {
                self.notifier.success("Settings reset to defaults");
                self.refresh().await;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Settings reset failed");
                self.notifier.error(e.user_message("Failed to reset settings"));
                Err(e)
            }
        }
    }
}
