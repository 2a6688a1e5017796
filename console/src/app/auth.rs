//! # Auth Controller
//!
//! Login form state, profile and password management, logout.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{AdminProfile, MessageResponse, UpdateProfileRequest};

use super::notifications::Notifier;
use crate::core::error::{AppError, Result};
use crate::core::service::AdminApi;
use crate::utils::validation::{validate_email, validate_password, validate_totp_code};

/// Authentication state
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Login form
    Login {
        email: String,
        totp_code: String,
        error: Option<String>,
        pending: bool,
    },
    /// Logged in
    Authenticated { profile: AdminProfile },
}

impl Default for AuthState {
    fn default() -> Self {
        AuthState::Login {
            email: String::new(),
            totp_code: String::new(),
            error: None,
            pending: false,
        }
    }
}

impl AuthState {
    fn login_error(email: String, message: impl Into<String>) -> Self {
        AuthState::Login {
            email,
            totp_code: String::new(),
            error: Some(message.into()),
            pending: false,
        }
    }

    pub fn profile(&self) -> Option<&AdminProfile> {
        match self {
            AuthState::Authenticated { profile } => Some(profile),
            AuthState::Login { .. } => None,
        }
    }
}

pub struct AuthController {
    api: Arc<dyn AdminApi>,
    state: Arc<RwLock<AuthState>>,
    notifier: Notifier,
}

impl AuthController {
    /// Start authenticated when a token and profile were persisted
    pub fn new(api: Arc<dyn AdminApi>, notifier: Notifier) -> Self {
        let session = api.session();
        let state = match (session.token, session.profile) {
            (Some(_), Some(profile)) => AuthState::Authenticated { profile },
            _ => AuthState::default(),
        };

        Self {
            api,
            state: Arc::new(RwLock::new(state)),
            notifier,
        }
    }

    pub fn state(&self) -> Arc<RwLock<AuthState>> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), AuthState::Authenticated { .. })
    }

    /// Log in and load the admin profile.
    pub async fn login(&self, email: &str, password: &str, totp_code: Option<&str>) -> Result<AdminProfile> {
        let email = email.trim().to_string();
        let totp_code = totp_code.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string);

        if let Err(e) = Self::check_login_input(&email, password, totp_code.as_deref()) {
            *self.state.write() = AuthState::login_error(email, e.user_message("Invalid input"));
            return Err(e);
        }

        *self.state.write() = AuthState::Login {
            email: email.clone(),
            totp_code: totp_code.clone().unwrap_or_default(),
            error: None,
            pending: true,
        };

        let result = async {
            self.api.login(email.clone(), password.to_string(), totp_code).await?;
            self.api.get_profile().await.map_err(|e| {
                // A token without a profile would reopen on the login form
                if let Err(clear) = self.api.discard_session() {
                    tracing::error!(error = %clear, "Failed to drop token after profile fetch failed");
                }
                e
            })
        }
        .await;

        match result {
            Ok(profile) => {
                tracing::info!(username = %profile.username, "Admin authenticated");
                *self.state.write() = AuthState::Authenticated {
                    profile: profile.clone(),
                };
                self.notifier.success(format!("Welcome back, {}", profile.username));
                Ok(profile)
            }
            Err(e) => {
                let message = e.user_message("Login failed");
                *self.state.write() = AuthState::login_error(email, message.clone());
                self.notifier.error(message);
                Err(e)
            }
        }
    }

    fn check_login_input(email: &str, password: &str, totp_code: Option<&str>) -> Result<()> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation("Email and password required".to_string()));
        }
        validate_email(email).into_result()?;
        if let Some(code) = totp_code {
            validate_totp_code(code).into_result()?;
        }
        Ok(())
    }

    /// End the session. Always lands on the login form.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "Server logout failed, local session cleared anyway");
        }
        *self.state.write() = AuthState::default();
        self.notifier.info("Logged out");
    }

    /// Change the password after checking the policy locally
    pub async fn change_password(&self, old_password: &str, new_password: &str, confirm: &str) -> Result<MessageResponse> {
        let checked = if new_password != confirm {
            Err(AppError::Validation("Passwords don't match".to_string()))
        } else if new_password == old_password {
            Err(AppError::Validation(
                "New password must differ from the current one".to_string(),
            ))
        } else {
            validate_password(new_password).into_result()
        };

        if let Err(e) = checked {
            self.notifier.error(e.user_message("Invalid password"));
            return Err(e);
        }

        match self
            .api
            .change_password(old_password.to_string(), new_password.to_string())
            .await
        {
            Ok(response) => {
                self.notifier.success("Password changed successfully");
                Ok(response)
            }
            Err(e) => {
                self.notifier.error(e.user_message("Failed to change password"));
                Err(e)
            }
        }
    }

    pub async fn update_profile(&self, update: UpdateProfileRequest) -> Result<AdminProfile> {
        if let Some(email) = &update.email {
            if let Err(e) = validate_email(email).into_result() {
                self.notifier.error(e.user_message("Invalid email"));
                return Err(e);
            }
        }

        match self.api.update_profile(update).await {
            Ok(profile) => {
                *self.state.write() = AuthState::Authenticated {
                    profile: profile.clone(),
                };
                self.notifier.success("Profile updated successfully");
                Ok(profile)
            }
            Err(e) => {
                self.notifier.error(e.user_message("Failed to update profile"));
                Err(e)
            }
        }
    }

    /// Drop back to the login form if the client lost its session (e.g. a 401).
    ///
    /// Returns whether the operator is still authenticated.
    pub fn sync_with_session(&self) -> bool {
        if self.api.is_authenticated() {
            return self.is_authenticated();
        }

        let expired = self.state.read().profile().map(|p| (p.username.clone(), p.email.clone()));
        if let Some((username, email)) = expired {
            tracing::warn!(username = %username, "Session expired");
            *self.state.write() = AuthState::login_error(email, "Session expired");
            self.notifier.warning("Session expired, please log in again");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notifications::NotificationCenter;
    use crate::app::testing::{FakeAdminApi, FAKE_PASSWORD};

    fn setup() -> (Arc<FakeAdminApi>, AuthController, NotificationCenter) {
        let api = Arc::new(FakeAdminApi::new());
        let center = NotificationCenter::new();
        let auth = AuthController::new(api.clone(), center.notifier());
        (api, auth, center)
    }

    // ========== Login Tests ==========

    #[tokio::test]
    async fn test_login_success() {
        let (api, auth, _) = setup();
        let profile = auth.login("ops@example.com", FAKE_PASSWORD, None).await.unwrap();

        assert_eq!(profile.email, "ops@example.com");
        assert!(auth.is_authenticated());
        assert!(api.session().token.is_some());
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let (api, auth, _) = setup();
        let err = auth.login("", "", None).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(api.login_calls(), 0);
        match auth.snapshot() {
            AuthState::Login { error, pending, .. } => {
                assert_eq!(error.as_deref(), Some("Email and password required"));
                assert!(!pending);
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_totp() {
        let (api, auth, _) = setup();
        assert!(auth.login("ops@example.com", FAKE_PASSWORD, Some("12ab")).await.is_err());
        assert_eq!(api.login_calls(), 0);
    }

    #[tokio::test]
    async fn test_login_failure_shows_server_detail() {
        let (api, auth, center) = setup();
        assert!(auth.login("ops@example.com", "WrongPass1", None).await.is_err());

        assert!(!auth.is_authenticated());
        assert!(api.session().token.is_none());
        assert_eq!(center.drain()[0].message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_profile_failure_after_login_drops_token() {
        let (api, auth, center) = setup();
        api.fail_profile(true);

        let err = auth.login("ops@example.com", FAKE_PASSWORD, None).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(api.login_calls(), 1);
        assert!(api.session().is_empty());
        assert!(!auth.is_authenticated());
        assert_eq!(center.drain()[0].message, "Login failed");
    }

    // ========== Logout Tests ==========

    #[tokio::test]
    async fn test_logout_returns_to_login_even_on_failure() {
        let (api, auth, _) = setup();
        auth.login("ops@example.com", FAKE_PASSWORD, None).await.unwrap();
        api.fail_mutations(true);

        auth.logout().await;

        assert_eq!(auth.snapshot(), AuthState::default());
        assert!(api.session().is_empty());
    }

    // ========== Password Tests ==========

    #[tokio::test]
    async fn test_change_password_checks_policy_first() {
        let (api, auth, _) = setup();
        auth.login("ops@example.com", FAKE_PASSWORD, None).await.unwrap();

        assert!(auth.change_password(FAKE_PASSWORD, "weak", "weak").await.is_err());
        assert!(auth
            .change_password(FAKE_PASSWORD, "Stronger123", "Stronger124")
            .await
            .is_err());
        assert_eq!(api.password_changes(), 0);

        auth.change_password(FAKE_PASSWORD, "Stronger123", "Stronger123")
            .await
            .unwrap();
        assert_eq!(api.password_changes(), 1);
    }

    // ========== Session Tests ==========

    #[tokio::test]
    async fn test_sync_with_session_detects_expiry() {
        let (api, auth, center) = setup();
        auth.login("ops@example.com", FAKE_PASSWORD, None).await.unwrap();
        center.drain();

        api.expire_session();
        assert!(!auth.sync_with_session());
        assert!(!auth.is_authenticated());
        assert_eq!(center.drain()[0].message, "Session expired, please log in again");
    }
}
