//! In-process [`UserStore`] adapter.
//!
//! Keeps items in a `HashMap` behind a read-write lock. Suitable for local
//! runs and tests; contents vanish with the process.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{StoreItem, UserStore, UserStoreError};

fn poisoned<T>(_: PoisonError<T>) -> UserStoreError {
    UserStoreError::connection("in-memory user store lock poisoned")
}

fn require_key(item: &StoreItem) -> Result<String, UserStoreError> {
    item.key()
        .map(str::to_owned)
        .ok_or_else(|| UserStoreError::query("item is missing its key attribute"))
}

/// User store holding items in memory.
///
/// # Examples
/// ```
/// use user_registry::outbound::memory::InMemoryUserStore;
///
/// let store = InMemoryUserStore::new("users");
/// assert_eq!(store.table(), "users");
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    table: String,
    items: RwLock<HashMap<String, StoreItem>>,
}

impl InMemoryUserStore {
    /// Create an empty store for `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Name of the table this store represents.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Number of stored items. A poisoned lock reads as empty.
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or_default()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, key: &str) -> Result<Option<StoreItem>, UserStoreError> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    async fn put(&self, item: &StoreItem) -> Result<(), UserStoreError> {
        let key = require_key(item)?;
        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(key, item.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), UserStoreError> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.remove(key);
        Ok(())
    }

    async fn put_if_absent(&self, item: &StoreItem) -> Result<bool, UserStoreError> {
        let key = require_key(item)?;
        let mut items = self.items.write().map_err(poisoned)?;
        if items.contains_key(&key) {
            return Ok(false);
        }
        items.insert(key, item.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn item(email: &str, first_name: &str) -> StoreItem {
        serde_json::from_value(json!({
            "email": email,
            "firstName": first_name,
            "lastName": "B",
        }))
        .expect("item")
    }

    #[fixture]
    fn store() -> InMemoryUserStore {
        InMemoryUserStore::new("users")
    }

    #[rstest]
    #[tokio::test]
    async fn get_returns_none_for_unknown_key(store: InMemoryUserStore) {
        let found = store.get("a@b.com").await.expect("get succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn put_then_get_round_trips(store: InMemoryUserStore) {
        let stored = item("a@b.com", "A");
        store.put(&stored).await.expect("put succeeds");

        let found = store.get("a@b.com").await.expect("get succeeds");
        assert_eq!(found, Some(stored));
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn put_replaces_existing_item(store: InMemoryUserStore) {
        store.put(&item("a@b.com", "A")).await.expect("first put");
        store.put(&item("a@b.com", "A2")).await.expect("second put");

        let found = store.get("a@b.com").await.expect("get succeeds");
        assert_eq!(found, Some(item("a@b.com", "A2")));
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn put_rejects_item_without_key(store: InMemoryUserStore) {
        let keyless: StoreItem = serde_json::from_value(json!({ "firstName": "A" })).expect("item");
        let result = store.put(&keyless).await;
        assert!(matches!(result, Err(UserStoreError::Query { .. })));
        assert!(store.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_item_and_tolerates_missing_keys(store: InMemoryUserStore) {
        store.put(&item("a@b.com", "A")).await.expect("put succeeds");

        store.delete("a@b.com").await.expect("delete succeeds");
        store.delete("a@b.com").await.expect("repeat delete succeeds");
        assert!(store.get("a@b.com").await.expect("get succeeds").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn put_if_absent_only_writes_vacant_keys(store: InMemoryUserStore) {
        let first = store
            .put_if_absent(&item("a@b.com", "A"))
            .await
            .expect("first write");
        let second = store
            .put_if_absent(&item("a@b.com", "Z"))
            .await
            .expect("second write");

        assert!(first);
        assert!(!second);
        let found = store.get("a@b.com").await.expect("get succeeds");
        assert_eq!(found, Some(item("a@b.com", "A")));
    }
}
