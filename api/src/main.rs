//! AuthGate API server binary.
//!
//! Wires the production backends (MySQL user store, Redis primary cache
//! with in-memory fallback, Redis rate limiter) into the service graph and
//! starts the HTTP server.

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::{error, info, warn};
use std::io;
use std::sync::Arc;

use ag_core::cache::{FallbackCache, KeyValueCache, MemoryCache};
use ag_core::services::auth::{AuthService, MemoryRateLimiter, RateLimiterTrait};
use ag_core::services::reset::{ResetConfig, ResetService, ResetTokenStore};
use ag_core::services::token::{TokenService, TokenServiceConfig};
use ag_infra::cache::RedisClient;
use ag_infra::database::{DatabasePool, MySqlUserRepository};
use ag_infra::services::auth::RedisRateLimiter;

use ag_api::app::create_app;
use ag_api::config::ApiConfig;
use ag_api::routes::auth::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting AuthGate API Server");

    let config = ApiConfig::from_env();
    if config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is unset; using the development default");
    }

    // User store
    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let users = Arc::new(MySqlUserRepository::new(pool.pool().clone()));

    // Cache tiers and rate limiter. Redis being down at startup is fatal
    // only when the fallback tier is disabled; with it enabled the service
    // comes up degraded on the in-memory tier alone.
    let redis = match RedisClient::new(&config.cache).await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) if config.cache.fallback_enabled => {
            error!("Redis unavailable, continuing on the fallback tier: {}", e);
            None
        }
        Err(e) => {
            return Err(io::Error::new(io::ErrorKind::Other, e.to_string()));
        }
    };

    let token_cache: Arc<dyn KeyValueCache> = match (&redis, config.cache.fallback_enabled) {
        (Some(redis), true) => Arc::new(FallbackCache::new(
            redis.clone(),
            Arc::new(MemoryCache::new()),
        )),
        (Some(redis), false) => redis.clone(),
        (None, _) => Arc::new(MemoryCache::new()),
    };

    let rate_limiter: Arc<dyn RateLimiterTrait> = match &redis {
        Some(redis) => Arc::new(RedisRateLimiter::new(
            redis.clone(),
            config.rate_limit.clone(),
        )),
        None => Arc::new(MemoryRateLimiter::new(config.rate_limit.clone())),
    };

    // Services
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt)));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        token_service.clone(),
        rate_limiter.clone(),
    ));
    let reset_service = Arc::new(ResetService::new(
        users,
        ResetTokenStore::new(token_cache, ResetConfig::default()),
        rate_limiter,
    ));

    let state = web::Data::new(AppState {
        auth_service,
        reset_service,
        token_service,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || create_app(state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }
    server.bind(&bind_address)?.run().await
}
