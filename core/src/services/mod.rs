//! Business services containing domain logic and use cases.

pub mod auth;
pub mod reset;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, MemoryRateLimiter, RateLimiterTrait, RateScope};
pub use reset::{ResetService, ResetTokenStore};
pub use token::{TokenService, TokenServiceConfig};
