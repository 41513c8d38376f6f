//! Shared configuration types and utilities for the AuthGate workspace.

pub mod config;
pub mod utils;

pub use config::{
    CacheConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ScopeLimit, ServerConfig,
};
