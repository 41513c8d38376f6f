//! Key-value cache abstraction used by the reset-token store.
//!
//! The store interface is deliberately small: set-with-expiry, get, an
//! atomic take (get-and-delete), and delete. Two concrete tiers implement it
//! (Redis in `ag_infra`, [`MemoryCache`] here) and [`FallbackCache`] composes
//! them behind the same interface, trying the primary tier first and falling
//! through to the secondary on failure or absence.

use async_trait::async_trait;

pub mod fallback;
pub mod memory;
pub mod mock;

pub use fallback::FallbackCache;
pub use memory::MemoryCache;
pub use mock::UnavailableCache;

/// Object-safe key-value cache contract.
///
/// Errors are tier-level failures (connection refused, timeout); a missing
/// key is `Ok(None)`, not an error. Callers that compose tiers need to treat
/// the two cases differently, which is why the distinction is kept here.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Store a value under `key` with a time-to-live in seconds.
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), String>;

    /// Read a value without consuming it.
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Atomically read and delete a value. Under concurrent calls for the
    /// same key, at most one caller observes `Some`.
    async fn take(&self, key: &str) -> Result<Option<String>, String>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), String>;
}
