//! Port abstraction for the key-value store holding user items.

use async_trait::async_trait;
use thiserror::Error;

use super::StoreItem;

/// Errors surfaced by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// The backing store could not be reached.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Driver or pool diagnostic.
        message: String,
    },
    /// A read, write, or delete command failed.
    #[error("user store query failed: {message}")]
    Query {
        /// Diagnostic from the failed command.
        message: String,
    },
    /// Stored bytes could not be converted to or from an item.
    #[error("user store codec failed: {message}")]
    Codec {
        /// Why the conversion failed.
        message: String,
    },
}

impl UserStoreError {
    /// Helper for connectivity failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for failed commands.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for encoding and decoding failures.
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }
}

/// Narrow capability over a key-value store keyed by email.
///
/// Absence is reported as `Ok(None)`, never as an error or an empty item.
/// Adapters are shared across concurrent requests and must not require
/// exclusive access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the item stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<StoreItem>, UserStoreError>;

    /// Insert or replace the item under its key.
    async fn put(&self, item: &StoreItem) -> Result<(), UserStoreError>;

    /// Remove the item under `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), UserStoreError>;

    /// Write the item only when its key is vacant.
    ///
    /// Returns `Ok(false)` when an item already exists. The default is a
    /// non-atomic get-then-put; adapters with a native create-if-absent
    /// primitive should override it.
    async fn put_if_absent(&self, item: &StoreItem) -> Result<bool, UserStoreError> {
        let Some(key) = item.key() else {
            return Err(UserStoreError::query("item is missing its key attribute"));
        };
        if self.get(key).await?.is_some() {
            return Ok(false);
        }
        self.put(item).await?;
        Ok(true)
    }
}
