//! Validation for operator input (login form, password change, 2FA codes)

use crate::core::error::{AppError, Result};

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Turn a failed check into [`AppError::Validation`]
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return ValidationResult::err("Invalid email format");
    };

    if local.is_empty() || domain.contains('@') {
        return ValidationResult::err("Invalid email format");
    }

    if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Platform password policy: 8+ characters with upper, lower and a digit
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < 8 {
        return ValidationResult::err("Password must be at least 8 characters");
    }

    if !password.chars().any(char::is_uppercase) {
        return ValidationResult::err("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(char::is_lowercase) {
        return ValidationResult::err("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return ValidationResult::err("Password must contain at least one number");
    }

    ValidationResult::ok()
}

/// Authenticator codes are exactly six digits
pub fn validate_totp_code(code: &str) -> ValidationResult {
    let code = code.trim();
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return ValidationResult::err("2FA code must be 6 digits");
    }
    ValidationResult::ok()
}
