//! Authentication service implementation.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ag_shared::utils::normalize_email;

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::password::{hash_password, verify_against_dummy, verify_password};
use super::rate_limiter::{mask_email, RateLimiterTrait, RateScope};

/// Service handling registration, login, and profile reads.
///
/// Credential verification is opaque by construction: unknown email and
/// wrong password converge on the same error, and the unknown-email path
/// still pays for one bcrypt verification.
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    tokens: Arc<TokenService>,
    rate_limiter: Arc<dyn RateLimiterTrait>,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(
        users: Arc<U>,
        tokens: Arc<TokenService>,
        rate_limiter: Arc<dyn RateLimiterTrait>,
    ) -> Self {
        Self {
            users,
            tokens,
            rate_limiter,
        }
    }

    /// Register a new user and issue an initial token pair.
    ///
    /// The email arrives already format-validated from the DTO layer; it is
    /// normalized here so lookups stay exact-match.
    pub async fn register(
        &self,
        email: &str,
        full_name: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        if self.users.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(User::new(email.clone(), full_name.to_string(), password_hash))
            .await?;

        info!("registered user {}", mask_email(&email));

        let tokens = self.tokens.generate_tokens(user.id)?;
        Ok(AuthResponse::new(user, tokens))
    }

    /// Authenticate with email and password and issue a token pair.
    ///
    /// Subject to the `login` rate scope, keyed by the caller's network
    /// origin.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client_key: &str,
    ) -> DomainResult<AuthResponse> {
        if !self.rate_limiter.allow(RateScope::Login, client_key).await {
            warn!("login rate limit exhausted for client {}", client_key);
            return Err(AuthError::RateLimitExceeded.into());
        }

        let user = self.verify_credentials(email, password).await?;

        // Bookkeeping only; a failed timestamp write must not fail the login.
        if let Err(e) = self.users.touch_last_login(user.id).await {
            warn!("failed to record last login for {}: {}", user.id, e);
        }

        let tokens = self.tokens.generate_tokens(user.id)?;
        Ok(AuthResponse::new(user, tokens))
    }

    /// Check submitted credentials against the user store.
    ///
    /// Returns the subject on success and an opaque `InvalidCredentials`
    /// otherwise. Neither the error nor its timing reveals whether the email
    /// existed.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = normalize_email(email);

        match self.users.find_by_email(&email).await? {
            Some(user) => {
                if user.is_active && verify_password(password, &user.password_hash) {
                    Ok(user)
                } else {
                    info!("failed login for {}", mask_email(&email));
                    Err(AuthError::InvalidCredentials.into())
                }
            }
            None => {
                verify_against_dummy(password);
                info!("failed login for {}", mask_email(&email));
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// Load the profile of an authenticated subject.
    pub async fn profile(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))
    }
}
