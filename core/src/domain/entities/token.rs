//! JWT claims and token pair entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, TokenError};

/// Claims carried by AuthGate access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's UUID as a string
    pub sub: String,

    /// Expiry as a Unix timestamp
    pub exp: i64,

    /// Issued-at as a Unix timestamp
    pub iat: i64,

    /// Unique token identifier
    pub jti: String,

    /// Token kind: `access` or `refresh`
    pub token_type: String,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Parses the subject claim into a user id.
    pub fn user_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub).map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }

    pub fn is_access(&self) -> bool {
        self.token_type == "access"
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == "refresh"
    }
}

/// Access + refresh token pair issued at login, registration, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}
