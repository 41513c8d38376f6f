//! Authentication response value object.

use serde::Serialize;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Result of a successful login or registration: the authenticated subject
/// plus a freshly issued token pair.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub tokens: TokenPair,
}

impl AuthResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}
