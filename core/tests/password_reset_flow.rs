//! End-to-end password reset flow over in-memory backends: the auth and
//! reset services wired the way the API composes them, sharing one user
//! store and one rate limiter.

use std::sync::Arc;

use ag_core::repositories::MockUserRepository;
use ag_core::services::auth::password::hash_password;
use ag_core::services::reset::ResetConfig;
use ag_core::{
    AuthError, AuthService, DomainError, FallbackCache, KeyValueCache, MemoryCache,
    MemoryRateLimiter, RateLimiterTrait, ResetService, ResetTokenStore, TokenService,
    TokenServiceConfig, User, UserRepository,
};
use ag_shared::config::rate_limit::{RateLimitConfig, ScopeLimit};

const CLIENT: &str = "192.0.2.10";

struct Harness {
    users: Arc<MockUserRepository>,
    auth: AuthService<MockUserRepository>,
    reset: ResetService<MockUserRepository>,
}

fn harness(limits: RateLimitConfig) -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let limiter: Arc<dyn RateLimiterTrait> = Arc::new(MemoryRateLimiter::new(limits));
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));

    let cache: Arc<dyn KeyValueCache> = Arc::new(FallbackCache::new(
        Arc::new(MemoryCache::new()),
        Arc::new(MemoryCache::new()),
    ));
    let store = ResetTokenStore::new(cache, ResetConfig::default());

    Harness {
        users: users.clone(),
        auth: AuthService::new(users.clone(), tokens, limiter.clone()),
        reset: ResetService::new(users, store, limiter),
    }
}

fn lenient_limits() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        login: ScopeLimit::new(100, 60),
        password_reset: ScopeLimit::new(100, 3600),
    }
}

async fn seed(users: &MockUserRepository, email: &str, password: &str) -> User {
    users
        .create(User::new(
            email.to_string(),
            "Flow User".to_string(),
            hash_password(password).unwrap(),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_full_reset_flow_rotates_credentials() {
    let h = harness(lenient_limits());
    seed(&h.users, "flow@example.com", "original-pw-1").await;

    // Old credentials work before the reset.
    h.auth
        .login("flow@example.com", "original-pw-1", CLIENT)
        .await
        .unwrap();

    let token = h
        .reset
        .request_reset("flow@example.com", CLIENT)
        .await
        .unwrap()
        .expect("known email yields a token");

    h.reset
        .confirm_reset(&token, "rotated-pw-2", "rotated-pw-2", CLIENT)
        .await
        .unwrap();

    // Old password is dead, new password works.
    let err = h
        .auth
        .login("flow@example.com", "original-pw-1", CLIENT)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    h.auth
        .login("flow@example.com", "rotated-pw-2", CLIENT)
        .await
        .unwrap();

    // The token was consumed; replaying it is rejected.
    let err = h
        .reset
        .confirm_reset(&token, "third-pw-3", "third-pw-3", CLIENT)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn test_request_outcomes_match_for_known_and_unknown_email() {
    let h = harness(lenient_limits());
    seed(&h.users, "flow@example.com", "original-pw-1").await;

    let known = h
        .reset
        .request_reset("flow@example.com", CLIENT)
        .await
        .unwrap();
    let unknown = h
        .reset
        .request_reset("stranger@example.com", CLIENT)
        .await
        .unwrap();

    // Both succeed with the same acknowledgment; only the presence of a
    // token differs.
    assert!(known.is_some());
    assert!(unknown.is_none());
}

#[tokio::test]
async fn test_reset_budget_is_separate_from_login_budget() {
    let h = harness(RateLimitConfig {
        enabled: true,
        login: ScopeLimit::new(1, 60),
        password_reset: ScopeLimit::new(1, 3600),
    });
    seed(&h.users, "flow@example.com", "original-pw-1").await;

    // Burn the login budget; the reset scope still has its own.
    h.auth
        .login("flow@example.com", "original-pw-1", CLIENT)
        .await
        .unwrap();
    assert!(matches!(
        h.auth
            .login("flow@example.com", "original-pw-1", CLIENT)
            .await
            .unwrap_err(),
        DomainError::Auth(AuthError::RateLimitExceeded)
    ));

    h.reset
        .request_reset("flow@example.com", CLIENT)
        .await
        .unwrap();
    assert!(matches!(
        h.reset
            .request_reset("flow@example.com", CLIENT)
            .await
            .unwrap_err(),
        DomainError::Auth(AuthError::RateLimitExceeded)
    ));
}
