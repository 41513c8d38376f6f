//! Environment-driven configuration for the API binary.
//!
//! Every setting has a development default; production deployments set the
//! variables below (usually via the process environment or a .env file
//! loaded by dotenvy in main).

use std::env;

use ag_shared::config::{
    CacheConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ScopeLimit, ServerConfig,
};

/// Aggregated configuration for one API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
}

impl ApiConfig {
    /// Build configuration from environment variables, falling back to
    /// development defaults for anything unset.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST`, `SERVER_PORT`
    /// - `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`
    /// - `REDIS_URL`, `CACHE_FALLBACK_ENABLED`
    /// - `JWT_SECRET`, `JWT_ISSUER`
    /// - `RATE_LIMIT_ENABLED`, `RATE_LIMIT_LOGIN`, `RATE_LIMIT_RESET`
    ///   (budgets in `max/window_seconds` form, e.g. `5/60`)
    pub fn from_env() -> Self {
        let server = ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("SERVER_PORT", 8080),
            workers: parse_var("SERVER_WORKERS", 0),
        };

        let mut database = DatabaseConfig::default();
        if let Ok(url) = env::var("DATABASE_URL") {
            database.url = url;
        }
        database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", database.max_connections);

        let mut cache = CacheConfig::default();
        if let Ok(url) = env::var("REDIS_URL") {
            cache.url = url;
        }
        cache.fallback_enabled = parse_var("CACHE_FALLBACK_ENABLED", cache.fallback_enabled);

        let mut jwt = JwtConfig::default();
        if let Ok(secret) = env::var("JWT_SECRET") {
            jwt.secret = secret;
        }
        if let Ok(issuer) = env::var("JWT_ISSUER") {
            jwt.issuer = issuer;
        }

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            enabled: parse_var("RATE_LIMIT_ENABLED", defaults.enabled),
            login: parse_budget("RATE_LIMIT_LOGIN", defaults.login),
            password_reset: parse_budget("RATE_LIMIT_RESET", defaults.password_reset),
        };

        Self {
            server,
            database,
            cache,
            jwt,
            rate_limit,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse a `max/window_seconds` budget string like `5/60`.
fn parse_budget(name: &str, default: ScopeLimit) -> ScopeLimit {
    let Ok(raw) = env::var(name) else {
        return default;
    };

    match raw.split_once('/') {
        Some((max, window)) => match (max.trim().parse(), window.trim().parse()) {
            (Ok(max_requests), Ok(window_seconds)) => ScopeLimit::new(max_requests, window_seconds),
            _ => {
                log::warn!("Ignoring malformed {}: {:?}", name, raw);
                default
            }
        },
        None => {
            log::warn!("Ignoring malformed {}: {:?}", name, raw);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_budget_shapes() {
        std::env::set_var("TEST_BUDGET_OK", "10/120");
        assert_eq!(
            parse_budget("TEST_BUDGET_OK", ScopeLimit::new(1, 1)).max_requests,
            10
        );

        std::env::set_var("TEST_BUDGET_BAD", "ten per minute");
        let fallback = parse_budget("TEST_BUDGET_BAD", ScopeLimit::new(7, 60));
        assert_eq!(fallback.max_requests, 7);
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ApiConfig::from_env();
        assert_eq!(config.jwt.access_token_expiry, 900);
        assert!(config.cache.fallback_enabled);
    }
}
