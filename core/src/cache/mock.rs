//! Cache doubles for exercising tier-failure paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

use super::KeyValueCache;

/// A cache tier that is permanently unreachable. Every operation fails and
/// is counted, so tests can assert that a tier was actually consulted.
#[derive(Default)]
pub struct UnavailableCache {
    calls: AtomicU32,
}

impl UnavailableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted against this tier.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err("connection refused".to_string())
    }
}

#[async_trait]
impl KeyValueCache for UnavailableCache {
    async fn set_with_expiry(&self, _key: &str, _value: &str, _ttl: u64) -> Result<(), String> {
        self.fail()
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, String> {
        self.fail()
    }

    async fn take(&self, _key: &str) -> Result<Option<String>, String> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> Result<(), String> {
        self.fail()
    }
}
