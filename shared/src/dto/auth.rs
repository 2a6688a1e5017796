use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin login request.
///
/// `totp_code` is always serialized, as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
    pub totp_code: Option<String>,
}

/// Token pair issued on successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Admin roles known to the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
    Moderator,
}

/// Logged-in administrator (cached alongside the session token)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: AdminRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_2fa_enabled: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Partial profile update; omitted fields are left unchanged server-side
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
