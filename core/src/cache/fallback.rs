//! Fallback decorator composing a primary and a secondary cache tier.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use super::KeyValueCache;

/// Two-tier cache: every operation tries the primary tier first and falls
/// back to the secondary.
///
/// Reads (`get`/`take`) fall through to the secondary both when the primary
/// errors and when it succeeds but finds nothing. The second case matters: a
/// value written while the primary was down lives only in the secondary
/// tier, and a primary that has since recovered answers "absent" for it.
/// Treating that answer as terminal would strand the value.
///
/// Tier errors are logged here and never escalated; an operation only
/// returns `Err` when both tiers failed.
pub struct FallbackCache {
    primary: Arc<dyn KeyValueCache>,
    secondary: Arc<dyn KeyValueCache>,
}

impl FallbackCache {
    pub fn new(primary: Arc<dyn KeyValueCache>, secondary: Arc<dyn KeyValueCache>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl KeyValueCache for FallbackCache {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), String> {
        match self.primary.set_with_expiry(key, value, expiry_seconds).await {
            Ok(()) => Ok(()),
            Err(primary_err) => {
                warn!("primary cache write failed, using fallback tier: {}", primary_err);
                self.secondary
                    .set_with_expiry(key, value, expiry_seconds)
                    .await
                    .map_err(|secondary_err| {
                        format!(
                            "both cache tiers failed: primary: {}; secondary: {}",
                            primary_err, secondary_err
                        )
                    })
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self.primary.get(key).await {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => self.secondary.get(key).await,
            Err(primary_err) => {
                warn!("primary cache read failed, trying fallback tier: {}", primary_err);
                self.secondary.get(key).await.map_err(|secondary_err| {
                    format!(
                        "both cache tiers failed: primary: {}; secondary: {}",
                        primary_err, secondary_err
                    )
                })
            }
        }
    }

    async fn take(&self, key: &str) -> Result<Option<String>, String> {
        // Short-circuit on a primary hit: the value was consumed from the
        // tier that served it, no second lookup.
        match self.primary.take(key).await {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => self.secondary.take(key).await,
            Err(primary_err) => {
                warn!("primary cache take failed, trying fallback tier: {}", primary_err);
                self.secondary.take(key).await.map_err(|secondary_err| {
                    format!(
                        "both cache tiers failed: primary: {}; secondary: {}",
                        primary_err, secondary_err
                    )
                })
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        // The key may live in either tier, so delete from both.
        let primary_result = self.primary.delete(key).await;
        let secondary_result = self.secondary.delete(key).await;
        match (primary_result, secondary_result) {
            (Err(p), Err(s)) => Err(format!(
                "both cache tiers failed: primary: {}; secondary: {}",
                p, s
            )),
            (Err(p), Ok(())) => {
                warn!("primary cache delete failed: {}", p);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
