//! Test doubles shared by the auth service tests.

use async_trait::async_trait;

use crate::services::auth::rate_limiter::{RateLimiterTrait, RateScope};

/// A rate limiter with no budget at all.
pub struct DenyAllLimiter;

#[async_trait]
impl RateLimiterTrait for DenyAllLimiter {
    async fn allow(&self, _scope: RateScope, _client_key: &str) -> bool {
        false
    }
}
