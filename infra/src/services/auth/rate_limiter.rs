//! Redis-based rate limiter implementation.
//!
//! Shares one counter per (scope, client key) across all service instances.
//! The counter is INCRed atomically on the server and the window expiry is
//! set on the first hit, so concurrent requests from one client cannot
//! over-admit. A Redis failure admits the request: availability of login
//! and reset outranks strict enforcement during a cache outage.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use ag_core::services::auth::rate_limiter::{RateLimiterTrait, RateScope};
use ag_shared::config::rate_limit::RateLimitConfig;

use crate::cache::redis_client::RedisClient;

const KEY_PREFIX: &str = "rate_limit";

/// Redis-backed implementation of the rate limiter trait.
pub struct RedisRateLimiter {
    redis_client: Arc<RedisClient>,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    pub fn new(redis_client: Arc<RedisClient>, config: RateLimitConfig) -> Self {
        Self {
            redis_client,
            config,
        }
    }

    fn counter_key(scope: RateScope, client_key: &str) -> String {
        format!("{}:{}:{}", KEY_PREFIX, scope.as_str(), client_key)
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn allow(&self, scope: RateScope, client_key: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        let limit = self.config.limit_for(scope.as_str());
        let key = Self::counter_key(scope, client_key);

        match self
            .redis_client
            .increment(&key, limit.window_seconds)
            .await
        {
            Ok(count) => count <= limit.max_requests as i64,
            Err(e) => {
                warn!(
                    "rate limit check unavailable for {} scope, admitting request: {}",
                    scope.as_str(),
                    e
                );
                true
            }
        }
    }
}
