//! # Authentication Endpoints
//!
//! Admin login, profile and logout. These are the only calls that write the
//! session store.

use serde_json::Value;
use shared::{AdminLoginRequest, AdminProfile, ChangePasswordRequest, MessageResponse, TokenResponse, UpdateProfileRequest};

use super::client::ApiClient;
use crate::core::error::{AppError, Result};

/// Login with email, password and an optional 2FA code.
///
/// The token is persisted only after a successful response. A rejected login
/// leaves any existing session in place.
#[tracing::instrument(skip(client, password, totp_code), fields(email = %email, with_totp = totp_code.is_some()))]
pub async fn login(
    client: &ApiClient,
    email: String,
    password: String,
    totp_code: Option<String>,
) -> Result<TokenResponse> {
    tracing::info!("Attempting admin login");
    let start = std::time::Instant::now();

    let request = AdminLoginRequest {
        email,
        password,
        totp_code,
    };

    let token: TokenResponse = client.post_credentials("/auth/login", &request).await?;
    if token.access_token.is_empty() {
        return Err(AppError::Decode("login response carried an empty access token".to_string()));
    }

    client.persist_token(&token.access_token)?;
    tracing::info!(duration_ms = start.elapsed().as_millis() as u64, "Admin login successful");
    Ok(token)
}

/// Fetch the logged-in admin and cache it in the session.
#[tracing::instrument(skip(client))]
pub async fn get_profile(client: &ApiClient) -> Result<AdminProfile> {
    let profile: AdminProfile = client.get("/auth/profile", &[]).await?;
    client.persist_profile(&profile)?;
    Ok(profile)
}

#[tracing::instrument(skip(client, update))]
pub async fn update_profile(client: &ApiClient, update: UpdateProfileRequest) -> Result<AdminProfile> {
    let profile: AdminProfile = client.put_json("/auth/profile", &update).await?;
    client.persist_profile(&profile)?;
    tracing::info!("Admin profile updated");
    Ok(profile)
}

#[tracing::instrument(skip_all)]
pub async fn change_password(client: &ApiClient, old_password: String, new_password: String) -> Result<MessageResponse> {
    let request = ChangePasswordRequest {
        old_password,
        new_password,
    };
    let response = client.post_json("/auth/change-password", &request).await?;
    tracing::info!("Admin password changed");
    Ok(response)
}

/// Tell the server we are leaving, then drop the local session.
///
/// Token and profile are removed whatever the server call does, including
/// when the returned future is dropped mid-flight.
#[tracing::instrument(skip(client))]
pub async fn logout(client: &ApiClient) -> Result<()> {
    let guard = SessionReset::arm(client);

    let notified = client.post_empty::<Value>("/auth/logout").await;
    if let Err(e) = &notified {
        tracing::warn!(error = %e, "Logout notification failed");
    }

    let cleared = guard.finish();
    notified?;
    cleared?;

    tracing::info!("Admin logged out");
    Ok(())
}

/// Clears the session on drop unless [`SessionReset::finish`] already did.
struct SessionReset<'a> {
    client: &'a ApiClient,
    armed: bool,
}

impl<'a> SessionReset<'a> {
    fn arm(client: &'a ApiClient) -> Self {
        Self { client, armed: true }
    }

    fn finish(mut self) -> Result<()> {
        self.armed = false;
        self.client.clear_session()
    }
}

impl Drop for SessionReset<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.client.clear_session() {
                tracing::error!(error = %e, "Failed to clear session");
            }
        }
    }
}
