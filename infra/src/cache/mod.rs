//! Redis-backed cache tier.
//!
//! `RedisClient` is the primary tier behind the core crate's `KeyValueCache`
//! abstraction. It owns a multiplexed connection, retries transient failures
//! with exponential backoff, and reports anything terminal upward so the
//! fallback tier can take over.

pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use ag_shared::config::cache::CacheConfig;
