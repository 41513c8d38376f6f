//! Password-reset flow orchestrator.

use std::sync::Arc;
use tracing::{info, warn};

use ag_shared::utils::normalize_email;

use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::auth::password::hash_password;
use crate::services::auth::rate_limiter::{mask_email, RateLimiterTrait, RateScope};

use super::token_store::ResetTokenStore;

/// Orchestrates the request-token and confirm-token halves of a password
/// reset.
///
/// Request is enumeration-resistant: the caller-visible outcome for a known
/// and an unknown email differs only in whether a token is present, never in
/// status or wording. Confirm treats expired, consumed, never-issued, and
/// subject-vanished tokens as one indistinguishable rejection.
pub struct ResetService<U: UserRepository> {
    users: Arc<U>,
    tokens: ResetTokenStore,
    rate_limiter: Arc<dyn RateLimiterTrait>,
}

impl<U: UserRepository> ResetService<U> {
    pub fn new(
        users: Arc<U>,
        tokens: ResetTokenStore,
        rate_limiter: Arc<dyn RateLimiterTrait>,
    ) -> Self {
        Self {
            users,
            tokens,
            rate_limiter,
        }
    }

    /// Handle a reset request for an email address.
    ///
    /// Returns `Some(token)` when the subject exists, `None` otherwise; the
    /// API layer renders both as the same acknowledgment. Repository errors
    /// propagate (and become a generic server error upstream); token storage
    /// failures do not, by the token store's contract.
    pub async fn request_reset(
        &self,
        email: &str,
        client_key: &str,
    ) -> DomainResult<Option<String>> {
        if !self
            .rate_limiter
            .allow(RateScope::PasswordReset, client_key)
            .await
        {
            warn!("password reset rate limit exhausted for client {}", client_key);
            return Err(AuthError::RateLimitExceeded.into());
        }

        let email = normalize_email(email);
        match self.users.find_by_email(&email).await? {
            Some(user) => {
                let token = self.tokens.issue(user.id).await;
                info!("issued reset token for {}", mask_email(&email));
                Ok(Some(token))
            }
            None => {
                // Same outcome shape as the hit path; only the token differs.
                info!("reset requested for unknown email {}", mask_email(&email));
                Ok(None)
            }
        }
    }

    /// Confirm a reset: redeem the token and overwrite the subject's
    /// password.
    ///
    /// The password/confirmation equality check runs before any store
    /// access.
    pub async fn confirm_reset(
        &self,
        token: &str,
        new_password: &str,
        new_password_confirm: &str,
        client_key: &str,
    ) -> DomainResult<()> {
        if !self
            .rate_limiter
            .allow(RateScope::PasswordReset, client_key)
            .await
        {
            return Err(AuthError::RateLimitExceeded.into());
        }

        if new_password != new_password_confirm {
            return Err(ValidationError::PasswordMismatch {
                field: "new_password_confirm".to_string(),
            }
            .into());
        }

        let subject_id = match self.tokens.redeem(token).await {
            Some(id) => id,
            None => return Err(AuthError::InvalidResetToken.into()),
        };

        let password_hash = hash_password(new_password)?;
        match self.users.update_password(subject_id, &password_hash).await? {
            true => {
                info!("password reset completed for {}", subject_id);
                Ok(())
            }
            false => {
                // Token redeemed but the subject is gone; callers get the
                // same rejection as for a bad token.
                warn!("reset token redeemed for missing subject {}", subject_id);
                Err(AuthError::InvalidResetToken.into())
            }
        }
    }
}
