//! # Infrastructure Layer
//!
//! Concrete backends behind the core crate's interfaces: the MySQL user
//! store, the Redis primary cache tier, and the Redis-backed rate limiter.
//! Everything here implements a trait owned by `ag_core`; the API layer
//! composes these with the in-process fallbacks at startup.

use thiserror::Error;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and the primary cache tier
pub mod cache;

/// Services module - Infrastructure service implementations
pub mod services;

pub use cache::RedisClient;
pub use database::DatabasePool;
pub use services::auth::RedisRateLimiter;

/// Errors raised by infrastructure backends.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
