//! Redis-backed [`UserStore`] adapter.
//!
//! Items are stored as JSON strings under `"<table>:<email>"`, so several
//! tables can share one Redis database. `put_if_absent` maps onto `SET NX`,
//! giving creates a real create-if-absent primitive.

mod pool;

pub use pool::{RedisPool, RedisPoolConfig};

use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;
use tracing::debug;

use crate::domain::ports::{StoreItem, UserStore, UserStoreError};

/// Build the Redis key for `email` within `table`.
///
/// # Examples
/// ```
/// use user_registry::outbound::redis::namespaced_key;
///
/// assert_eq!(namespaced_key("users", "a@b.com"), "users:a@b.com");
/// ```
pub fn namespaced_key(table: &str, email: &str) -> String {
    format!("{table}:{email}")
}

fn encode_item(item: &StoreItem) -> Result<(String, String), UserStoreError> {
    let key = item
        .key()
        .ok_or_else(|| UserStoreError::query("item is missing its key attribute"))?
        .to_owned();
    let payload =
        serde_json::to_string(item).map_err(|err| UserStoreError::codec(err.to_string()))?;
    Ok((key, payload))
}

fn decode_item(payload: &str) -> Result<StoreItem, UserStoreError> {
    serde_json::from_str(payload).map_err(|err| UserStoreError::codec(err.to_string()))
}

/// User store persisting items in Redis.
#[derive(Clone)]
pub struct RedisUserStore {
    pool: RedisPool,
    table: String,
}

impl RedisUserStore {
    /// Create a store writing under the `table` namespace.
    pub fn new(pool: RedisPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    fn key_for(&self, email: &str) -> String {
        namespaced_key(&self.table, email)
    }
}

#[async_trait]
impl UserStore for RedisUserStore {
    async fn get(&self, key: &str) -> Result<Option<StoreItem>, UserStoreError> {
        let mut conn = self.pool.get().await?;
        let payload: Option<String> = conn
            .get(self.key_for(key))
            .await
            .map_err(|err| UserStoreError::query(err.to_string()))?;
        payload.as_deref().map(decode_item).transpose()
    }

    async fn put(&self, item: &StoreItem) -> Result<(), UserStoreError> {
        let (key, payload) = encode_item(item)?;
        let mut conn = self.pool.get().await?;
        let () = conn
            .set(self.key_for(&key), payload)
            .await
            .map_err(|err| UserStoreError::query(err.to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await?;
        let removed: i64 = conn
            .del(self.key_for(key))
            .await
            .map_err(|err| UserStoreError::query(err.to_string()))?;
        debug!(table = %self.table, removed, "redis delete completed");
        Ok(())
    }

    async fn put_if_absent(&self, item: &StoreItem) -> Result<bool, UserStoreError> {
        let (key, payload) = encode_item(item)?;
        let mut conn = self.pool.get().await?;
        conn.set_nx(self.key_for(&key), payload)
            .await
            .map_err(|err| UserStoreError::query(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn namespaced_key_prefixes_table() {
        assert_eq!(
            namespaced_key("golang-serverless-user", "a@b.com"),
            "golang-serverless-user:a@b.com"
        );
    }

    #[rstest]
    fn encode_item_returns_key_and_json() {
        let item: StoreItem =
            serde_json::from_value(json!({ "email": "a@b.com", "firstName": "A" }))
                .expect("item");
        let (key, payload) = encode_item(&item).expect("item encodes");

        assert_eq!(key, "a@b.com");
        assert_eq!(decode_item(&payload).expect("payload decodes"), item);
    }

    #[rstest]
    fn encode_item_requires_key_attribute() {
        let item: StoreItem = serde_json::from_value(json!({ "firstName": "A" })).expect("item");
        let result = encode_item(&item);
        assert!(matches!(result, Err(UserStoreError::Query { .. })));
    }

    #[rstest]
    #[case("not json")]
    #[case("[1, 2]")]
    fn decode_item_reports_codec_errors(#[case] payload: &str) {
        let result = decode_item(payload);
        assert!(matches!(result, Err(UserStoreError::Codec { .. })));
    }
}
