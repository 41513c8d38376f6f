//! # AuthGate Core
//!
//! Core business logic and domain layer for the AuthGate backend.
//! This crate contains domain entities, the cache abstraction with its
//! fallback tier, business services, repository interfaces, and error types.

pub mod cache;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use cache::{FallbackCache, KeyValueCache, MemoryCache};
pub use domain::entities::user::User;
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::UserRepository;
pub use services::auth::{AuthService, MemoryRateLimiter, RateLimiterTrait, RateScope};
pub use services::reset::{ResetService, ResetTokenStore};
pub use services::token::{TokenService, TokenServiceConfig};
