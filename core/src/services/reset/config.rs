//! Configuration for the password-reset flow

/// Configuration for reset token generation and storage.
#[derive(Debug, Clone)]
pub struct ResetConfig {
    /// Token time-to-live in seconds
    pub token_ttl_seconds: u64,
    /// Random bytes per token before URL-safe encoding
    pub token_bytes: usize,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            token_ttl_seconds: 600, // 10 minutes
            token_bytes: 32,        // 256 bits
        }
    }
}
