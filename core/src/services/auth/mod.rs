//! Authentication service: credential verification, registration, and the
//! rate-limiting seam consulted before any credentialed operation.

pub mod password;
pub mod rate_limiter;
pub mod service;

#[cfg(test)]
mod tests;

pub use password::{hash_password, verify_password};
pub use rate_limiter::{mask_email, MemoryRateLimiter, RateLimiterTrait, RateScope};
pub use service::AuthService;
