//! Rate limiting trait and in-process implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use ag_shared::config::rate_limit::RateLimitConfig;

/// Endpoint scopes with independent request budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateScope {
    Login,
    PasswordReset,
}

impl RateScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateScope::Login => "login",
            RateScope::PasswordReset => "password_reset",
        }
    }
}

/// Rate limiting seam consulted before credentialed operations.
///
/// `allow` both checks and consumes budget: a `true` return has already
/// counted the request. Implementations must make check-and-increment atomic
/// per (scope, client key) so concurrent requests cannot both slip under the
/// limit.
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Returns true if the request fits the budget for this scope and
    /// client key, counting it toward the budget; false once the budget for
    /// the current window is exhausted.
    async fn allow(&self, scope: RateScope, client_key: &str) -> bool;
}

struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window in-process rate limiter.
///
/// One mutex over the window map makes check-and-increment a single step.
/// State is process-local and vanishes on restart, which matches the
/// budget's contract.
pub struct MemoryRateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<(RateScope, String), Window>>,
}

impl MemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiterTrait for MemoryRateLimiter {
    async fn allow(&self, scope: RateScope, client_key: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        let limit = self.config.limit_for(scope.as_str());
        let window_len = Duration::from_secs(limit.window_seconds);
        let now = Instant::now();

        let mut windows = self.windows.lock().await;
        let window = windows
            .entry((scope, client_key.to_string()))
            .or_insert(Window {
                started_at: now,
                count: 0,
            });

        if now.duration_since(window.started_at) >= window_len {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= limit.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

/// Mask an email for log lines: keeps the first character of the local part
/// and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
