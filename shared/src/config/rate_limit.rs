//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Request budget for one rate-limit scope: at most `max_requests` calls per
/// `window_seconds` for a given client key.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ScopeLimit {
    /// Maximum requests admitted within one window
    pub max_requests: u32,

    /// Window duration in seconds
    pub window_seconds: u64,
}

impl ScopeLimit {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }
}

/// Rate limiting configuration, one budget per endpoint scope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Budget for the `login` scope, keyed by client IP
    pub login: ScopeLimit,

    /// Budget for the `password_reset` scope (request and confirm), keyed by
    /// client IP
    pub password_reset: ScopeLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            login: ScopeLimit::new(5, 60),
            password_reset: ScopeLimit::new(3, 3600),
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl RateLimitConfig {
    /// Look up the budget for a scope by name. Unknown scopes get the
    /// stricter password-reset budget.
    pub fn limit_for(&self, scope: &str) -> ScopeLimit {
        match scope {
            "login" => self.login,
            "password_reset" => self.password_reset,
            _ => self.password_reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_for_known_scopes() {
        let config = RateLimitConfig::default();
        assert_eq!(config.limit_for("login").max_requests, 5);
        assert_eq!(config.limit_for("password_reset").window_seconds, 3600);
    }

    #[test]
    fn test_unknown_scope_uses_strict_budget() {
        let config = RateLimitConfig::default();
        let limit = config.limit_for("something_else");
        assert_eq!(limit.max_requests, config.password_reset.max_requests);
    }
}
