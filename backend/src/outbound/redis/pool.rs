//! Connection pool for the Redis-backed user store.
//!
//! Wraps `bb8-redis` so the adapter can check out multiplexed connections
//! with bounded size and checkout timeouts. Pool failures are mapped onto
//! [`UserStoreError::Connection`] so the domain never sees Redis types.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};

use crate::domain::ports::UserStoreError;

/// Configuration for the Redis connection pool.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use user_registry::outbound::redis::RedisPoolConfig;
///
/// let config = RedisPoolConfig::new("redis://127.0.0.1:6379")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(2));
/// assert_eq!(config.redis_url(), "redis://127.0.0.1:6379");
/// ```
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    redis_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl RedisPoolConfig {
    /// Create a configuration for `redis_url`.
    ///
    /// Defaults: 10 connections, 1 idle, 5 second checkout timeout.
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_size: 10,
            min_idle: Some(1),
            connection_timeout: Duration::from_secs(5),
        }
    }

    /// Set the maximum number of pooled connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the number of idle connections kept open.
    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set how long a checkout may wait for a free connection.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Redis connection URL.
    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }
}

/// Shared pool of Redis connections.
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool<RedisConnectionManager>,
}

impl RedisPool {
    /// Build the pool and open its initial connections.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::Connection`] when the URL is invalid or the
    /// server cannot be reached.
    pub async fn connect(config: RedisPoolConfig) -> Result<Self, UserStoreError> {
        let manager = RedisConnectionManager::new(config.redis_url.as_str())
            .map_err(|err| UserStoreError::connection(err.to_string()))?;

        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| UserStoreError::connection(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::Connection`] when no connection becomes
    /// available within the configured timeout.
    pub async fn get(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, UserStoreError> {
        self.inner
            .get()
            .await
            .map_err(|err| UserStoreError::connection(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = RedisPoolConfig::new("redis://localhost:6379");

        assert_eq!(config.redis_url(), "redis://localhost:6379");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.min_idle, Some(1));
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn pool_config_overrides_apply() {
        let config = RedisPoolConfig::new("redis://localhost:6379")
            .with_max_size(2)
            .with_min_idle(None)
            .with_connection_timeout(Duration::from_millis(250));

        assert_eq!(config.max_size, 2);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.connection_timeout, Duration::from_millis(250));
    }

    #[rstest]
    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let result = RedisPool::connect(RedisPoolConfig::new("not a url")).await;
        assert!(matches!(result, Err(UserStoreError::Connection { .. })));
    }
}
