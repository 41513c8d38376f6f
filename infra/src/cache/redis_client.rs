//! Redis cache client implementation
//!
//! Provides the primary cache tier for reset tokens and rate limit counters.
//! The client wraps a multiplexed async connection, bounds every operation
//! with the configured timeout, and retries transient failures with
//! exponential backoff before reporting the error to the caller.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use ag_core::cache::KeyValueCache;
use ag_shared::config::cache::CacheConfig;

use crate::InfrastructureError;

/// Redis cache client with retry logic and per-operation timeouts.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Per-operation timeout
    operation_timeout: Duration,
    /// Maximum number of retry attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client.
    ///
    /// Connects eagerly and fails fast on an unreachable server so a
    /// misconfigured deployment dies at startup instead of at first use.
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration.
    pub async fn new_with_retry_config(
        config: &CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Connecting to Redis at {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, max_retries, retry_delay_ms).await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            operation_timeout: Duration::from_millis(config.operation_timeout_ms),
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a value with an expiration time.
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value from the cache. A missing or expired key is `Ok(None)`.
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();

            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to get key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Atomically read and delete a value.
    ///
    /// GETDEL runs as a single server-side command, so under concurrent
    /// callers at most one observes the value.
    pub async fn take(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Taking key '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();

            Box::pin(async move {
                redis::cmd("GETDEL")
                    .arg(key)
                    .query_async::<_, Option<String>>(&mut conn)
                    .await
            })
        })
        .await
        .map_err(|e| {
            error!("Failed to take key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key. Returns whether the key existed.
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        let deleted = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        Ok(deleted > 0)
    }

    /// Increment a counter, starting its expiry window on first increment.
    ///
    /// Returns the new counter value. The INCR-then-EXPIRE pair means a
    /// counter created at the window's first request expires on schedule
    /// even when later increments race.
    pub async fn increment(
        &self,
        key: &str,
        expiry_seconds: u64,
    ) -> Result<i64, InfrastructureError> {
        debug!("Incrementing counter '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();

            Box::pin(async move {
                let count: i64 = conn.incr(&key, 1).await?;
                if count == 1 {
                    conn.expire::<_, ()>(&key, expiry_seconds as i64).await?;
                }
                Ok(count)
            })
        })
        .await
        .map_err(|e| {
            error!("Failed to increment counter '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check that the Redis connection answers a PING.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move {
                    redis::cmd("PING").query_async::<_, String>(&mut conn).await
                })
            })
            .await
            .map_err(InfrastructureError::Cache)?;

        Ok(response == "PONG")
    }

    /// Execute a Redis operation with timeout and automatic retry.
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        )
            -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            let outcome = match timeout(self.operation_timeout, operation(conn)).await {
                Ok(result) => result,
                Err(_) => Err(RedisError::from((
                    redis::ErrorKind::IoError,
                    "operation timed out",
                ))),
            };

            match outcome {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

// The fallback composition in ag_core speaks this trait; tier failures are
// stringly typed there so the core crate stays free of redis types.
#[async_trait]
impl KeyValueCache for RedisClient {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), String> {
        RedisClient::set_with_expiry(self, key, value, expiry_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        RedisClient::get(self, key).await.map_err(|e| e.to_string())
    }

    async fn take(&self, key: &str) -> Result<Option<String>, String> {
        RedisClient::take(self, key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        RedisClient::delete(self, key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Check if a Redis error is transient and worth retrying.
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging.
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
