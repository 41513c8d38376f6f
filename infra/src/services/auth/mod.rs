//! Redis-backed authentication services

pub mod rate_limiter;


pub use rate_limiter::RedisRateLimiter;
