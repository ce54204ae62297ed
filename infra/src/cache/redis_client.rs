//! Redis client with retry logic and per-command timeouts
//!
//! Wraps a multiplexed connection and exposes the handful of commands the
//! session and message stores need: string set/get/delete with expiry, hash
//! writes and reads, and cursor-based key scans. Session token writes go
//! through [`RedisClient::set_with_expiry_once`], which never retries.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Keys fetched per SCAN round trip
const SCAN_BATCH: usize = 100;

/// Upper bound for the exponential backoff between retries
const MAX_BACKOFF_MS: u64 = 5000;

/// How many times a command may be attempted and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub(crate) max_attempts: u32,
    pub(crate) initial_delay_ms: u64,
}

impl RetryPolicy {
    /// Retry transient failures up to `max_attempts` attempts in total
    pub(crate) fn new(max_attempts: u32, initial_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay_ms,
        }
    }

    /// Exactly one attempt; failures are returned to the caller as-is
    pub(crate) fn single_attempt() -> Self {
        Self::new(1, 0)
    }

    /// Whether the attempt numbered `attempts` (1-based) may be followed by another
    pub(crate) fn should_retry(&self, attempts: u32, error: &RedisError) -> bool {
        attempts < self.max_attempts && is_retriable_error(error)
    }

    /// Backoff before the attempt after one that waited `delay_ms`
    pub(crate) fn next_delay(delay_ms: u64) -> u64 {
        (delay_ms * 2).min(MAX_BACKOFF_MS)
    }
}

/// Redis client with automatic retry of transient failures
///
/// Cloning is cheap; clones share the same multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    response_timeout: Duration,
    retry: RetryPolicy,
}

impl RedisClient {
    /// Connect using the URL, timeouts and retry policy in `config`
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = config.max_retries.max(1);
        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout),
            max_retries,
            config.retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            response_timeout: Duration::from_secs(config.response_timeout),
            retry: RetryPolicy::new(max_retries, config.retry_delay_ms),
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result,
                Err(_) => Err(timed_out("Redis connection timed out")),
            };

            match result {
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
                    delay = RetryPolicy::next_delay(delay);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a string value with expiration time (SET EX) in a single attempt
    ///
    /// Bounded by the response timeout like every other command, but a
    /// failure or timeout is returned at once instead of being retried.
    pub async fn set_with_expiry_once(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s (single attempt)", key, expiry_seconds);

        let key_owned = key.to_string();
        let value = value.to_string();
        self.execute(RetryPolicy::single_attempt(), move |mut conn| {
            let key = key_owned.clone();
            let value = value.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Get a string value, `None` if the key is missing or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        let key_owned = key.to_string();
        let value = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to get key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        if value.is_none() {
            debug!("Key '{}' not found", key);
        }
        Ok(value)
    }

    /// Delete a key; returns whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        let key_owned = key.to_string();
        let deleted = self
            .execute_with_retry(move |mut conn| {
                let key = key_owned.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        Ok(deleted > 0)
    }

    /// Write several fields of a hash in one HSET
    pub async fn hset_multiple(
        &self,
        key: &str,
        fields: &[(&str, String)],
    ) -> Result<(), InfrastructureError> {
        debug!("Writing {} fields to hash '{}'", fields.len(), key);

        let key_owned = key.to_string();
        let fields: Vec<(String, String)> = fields
            .iter()
            .map(|(field, value)| (field.to_string(), value.clone()))
            .collect();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            let fields = fields.clone();
            Box::pin(async move { conn.hset_multiple::<_, _, _, ()>(key, &fields[..]).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to write hash '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Read every field of a hash; empty when the key is missing
    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, InfrastructureError> {
        let key_owned = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key_owned.clone();
            Box::pin(async move { conn.hgetall::<_, HashMap<String, String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to read hash '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// All keys matching a glob pattern, walked with SCAN rather than KEYS
    pub async fn scan_match(&self, pattern: &str) -> Result<Vec<String>, InfrastructureError> {
        debug!("Scanning keys matching '{}'", pattern);

        let pattern_owned = pattern.to_string();
        let mut keys = self
            .execute_with_retry(move |mut conn| {
                let pattern = pattern_owned.clone();
                Box::pin(async move {
                    let mut cursor: u64 = 0;
                    let mut keys = Vec::new();
                    loop {
                        let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                            .arg(cursor)
                            .arg("MATCH")
                            .arg(&pattern)
                            .arg("COUNT")
                            .arg(SCAN_BATCH)
                            .query_async(&mut conn)
                            .await?;
                        keys.extend(batch);
                        if next == 0 {
                            break;
                        }
                        cursor = next;
                    }
                    Ok(keys)
                })
            })
            .await
            .map_err(|e| {
                error!("Failed to scan keys matching '{}': {}", pattern, e);
                InfrastructureError::Cache(e)
            })?;

        // SCAN may report a key more than once
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                InfrastructureError::Cache(e)
            })?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Run `operation` under the client's configured retry policy
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        self.execute(self.retry, operation).await
    }

    /// Run `operation`, retrying transient failures as `policy` allows
    ///
    /// Each attempt is bounded by the response timeout; a timed out attempt
    /// counts as a transient failure.
    async fn execute<F, T>(&self, policy: RetryPolicy, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = policy.initial_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            let result = match timeout(self.response_timeout, operation(conn)).await {
                Ok(result) => result,
                Err(_) => Err(timed_out("Redis response timed out")),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if policy.should_retry(attempts, &e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, policy.max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = RetryPolicy::next_delay(delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn timed_out(message: &'static str) -> RedisError {
    RedisError::from((redis::ErrorKind::IoError, message))
}

/// Whether an error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}

/// Escape glob metacharacters so `value` matches literally in a SCAN pattern
pub(crate) fn escape_glob(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
