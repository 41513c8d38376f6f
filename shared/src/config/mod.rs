//! Configuration modules for the AuthGate services.

pub mod auth;
pub mod cache;
pub mod database;
pub mod rate_limit;
pub mod server;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use rate_limit::{RateLimitConfig, ScopeLimit};
pub use server::ServerConfig;
