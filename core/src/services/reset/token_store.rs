//! Reset token store adapter.
//!
//! Issues single-use, TTL-bound tokens and redeems them destructively
//! against the key-value cache (in production the primary/secondary
//! fallback composition). Storage trouble is this adapter's terminal
//! station: it is logged and translated into "skip" on issue and
//! "not found" on redeem, never surfaced as an error to the flow above.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::cache::KeyValueCache;

use super::config::ResetConfig;

const KEY_PREFIX: &str = "password_reset";

/// Store for password-reset tokens.
pub struct ResetTokenStore {
    cache: Arc<dyn KeyValueCache>,
    config: ResetConfig,
}

impl ResetTokenStore {
    pub fn new(cache: Arc<dyn KeyValueCache>, config: ResetConfig) -> Self {
        Self { cache, config }
    }

    /// Generate a reset token for a subject and persist it with the
    /// configured TTL.
    ///
    /// The token is always returned, even when the write failed: the reset
    /// flow's availability is not coupled to cache uptime. A failed write
    /// just produces a token that can never be redeemed.
    pub async fn issue(&self, subject_id: Uuid) -> String {
        let token = self.generate_token();
        let key = cache_key(&token);

        match self
            .cache
            .set_with_expiry(&key, &subject_id.to_string(), self.config.token_ttl_seconds)
            .await
        {
            Ok(()) => debug!("stored reset token {}... for {}", &token[..6], subject_id),
            Err(e) => error!("failed to store reset token: {}", e),
        }

        token
    }

    /// Redeem a token: return its subject id and remove it from whichever
    /// tier served it, so it can never be redeemed twice.
    ///
    /// Expired, already-consumed, and never-issued tokens are all `None`;
    /// so is a store outage (logged).
    pub async fn redeem(&self, token: &str) -> Option<Uuid> {
        let key = cache_key(token);

        let value = match self.cache.take(&key).await {
            Ok(value) => value,
            Err(e) => {
                error!("reset token lookup failed: {}", e);
                return None;
            }
        };

        match value {
            Some(raw) => match Uuid::parse_str(&raw) {
                Ok(subject_id) => Some(subject_id),
                Err(_) => {
                    warn!("reset token mapped to unparsable subject id");
                    None
                }
            },
            None => None,
        }
    }

    fn generate_token(&self) -> String {
        let mut bytes = vec![0u8; self.config.token_bytes];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

fn cache_key(token: &str) -> String {
    format!("{}:{}", KEY_PREFIX, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FallbackCache, MemoryCache, UnavailableCache};

    fn store_over(cache: Arc<dyn KeyValueCache>) -> ResetTokenStore {
        ResetTokenStore::new(cache, ResetConfig::default())
    }

    #[tokio::test]
    async fn test_token_shape() {
        let store = store_over(Arc::new(MemoryCache::new()));
        let token = store.issue(Uuid::new_v4()).await;

        // 32 random bytes, URL-safe base64 without padding.
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = store_over(Arc::new(MemoryCache::new()));
        let a = store.issue(Uuid::new_v4()).await;
        let b = store.issue(Uuid::new_v4()).await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_redeem_exactly_once() {
        let store = store_over(Arc::new(MemoryCache::new()));
        let subject = Uuid::new_v4();

        let token = store.issue(subject).await;
        assert_eq!(store.redeem(&token).await, Some(subject));
        assert_eq!(store.redeem(&token).await, None);
        assert_eq!(store.redeem(&token).await, None);
    }

    #[tokio::test]
    async fn test_unissued_token_redeems_to_none() {
        let store = store_over(Arc::new(MemoryCache::new()));
        assert_eq!(store.redeem("never-issued").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_expires_after_ttl() {
        let store = store_over(Arc::new(MemoryCache::new()));
        let token = store.issue(Uuid::new_v4()).await;

        tokio::time::advance(tokio::time::Duration::from_secs(601)).await;
        assert_eq!(store.redeem(&token).await, None);
    }

    #[tokio::test]
    async fn test_issue_survives_total_store_outage() {
        let store = store_over(Arc::new(UnavailableCache::new()));
        let token = store.issue(Uuid::new_v4()).await;

        // The caller still gets a token; it just can never be redeemed.
        assert_eq!(token.len(), 43);
        assert_eq!(store.redeem(&token).await, None);
    }

    #[tokio::test]
    async fn test_token_written_during_primary_outage_redeems_later() {
        // Issue while the primary is down, redeem through the same fallback
        // composition once the write landed in the secondary tier.
        let secondary = Arc::new(MemoryCache::new());
        let degraded: Arc<dyn KeyValueCache> = Arc::new(FallbackCache::new(
            Arc::new(UnavailableCache::new()),
            secondary.clone(),
        ));

        let subject = Uuid::new_v4();
        let store = store_over(degraded);
        let token = store.issue(subject).await;

        // Primary "recovers" (healthy but empty): redeem must fall through.
        let recovered: Arc<dyn KeyValueCache> = Arc::new(FallbackCache::new(
            Arc::new(MemoryCache::new()),
            secondary,
        ));
        let store = store_over(recovered);
        assert_eq!(store.redeem(&token).await, Some(subject));
        assert_eq!(store.redeem(&token).await, None);
    }

    #[tokio::test]
    async fn test_concurrent_redeems_admit_at_most_one() {
        let store = Arc::new(store_over(Arc::new(MemoryCache::new())));
        let subject = Uuid::new_v4();
        let token = store.issue(subject).await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let store = store.clone();
            let token = token.clone();
            handles.push(tokio::spawn(async move { store.redeem(&token).await }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
