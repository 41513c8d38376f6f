//! Cache tier configuration

use serde::{Deserialize, Serialize};

/// Configuration for the key-value cache tiers.
///
/// The primary tier is Redis; when it is unreachable, writes and reads fall
/// through to an in-process fallback tier so the reset flow keeps working
/// during a cache outage.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL for the primary tier
    pub url: String,

    /// Per-operation timeout in milliseconds; operations that exceed it are
    /// treated as a tier failure rather than left to hang
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// Enable the in-process fallback tier
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://127.0.0.1:6379"),
            operation_timeout_ms: default_operation_timeout_ms(),
            fallback_enabled: default_fallback_enabled(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with the given Redis URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_operation_timeout_ms() -> u64 {
    2000
}

fn default_fallback_enabled() -> bool {
    true
}
