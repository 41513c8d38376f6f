//! Authentication request and response bodies.
//!
//! Validation here covers shape only (format, lengths, required fields);
//! anything that needs the user store or the cache lives in the services.

use serde::{Deserialize, Serialize};
use validator::Validate;

use ag_core::domain::entities::user::User;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address"))]
    #[validate(length(max = 254, message = "Email address is too long"))]
    pub email: String,

    #[validate(length(min = 1, max = 150, message = "Full name is required"))]
    pub full_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub password_confirm: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,

    pub new_password_confirm: String,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

/// Body returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponseBody {
    pub user: UserResponse,
    pub access: String,
    pub refresh: String,
    pub expires_in: i64,
}

/// Body returned by the token refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
    pub expires_in: i64,
}

/// Acknowledgment for a password reset request. The detail string is the
/// same whether or not the email was known; `token` is present only on a
/// hit and is the caller's delivery channel (no email sending here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetRequestResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Generic single-message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
