//! Domain-specific error types and error handling.
//!
//! The taxonomy follows the service's disclosure policy: validation errors
//! carry field-level detail, authentication failures are deliberately opaque,
//! and infrastructure failures keep their detail server-side (logged) while
//! callers only see a generic retry-later message.

use thiserror::Error;

/// Authentication-related errors. Messages are what the API is allowed to
/// disclose; none of them reveal which condition actually held.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token. Please request a new password reset.")]
    InvalidResetToken,

    #[error("A user with this email address already exists")]
    UserAlreadyExists,

    #[error("Request was throttled. Please try again later.")]
    RateLimitExceeded,
}

/// JWT-related errors.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors, surfaced with field-level detail before any store
/// access is attempted.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Passwords do not match")]
    PasswordMismatch { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl ValidationError {
    /// The request field the error should be attached to in API responses.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field } => field,
            ValidationError::PasswordMismatch { field } => field,
            ValidationError::InvalidEmail => "email",
            ValidationError::PasswordTooShort { .. } => "password",
        }
    }
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;
