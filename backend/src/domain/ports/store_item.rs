//! Store item representation shared by the domain and store adapters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute holding the primary key of every item.
pub const KEY_ATTRIBUTE: &str = "email";

/// Flat attribute map persisted for a single user.
///
/// Items serialise as a plain JSON object so adapters can store them
/// verbatim. The key is the string value of the [`KEY_ATTRIBUTE`] attribute.
///
/// # Examples
/// ```
/// use serde_json::{Map, Value};
/// use user_registry::domain::ports::StoreItem;
///
/// let mut attributes = Map::new();
/// attributes.insert("email".to_owned(), Value::from("ada@example.com"));
/// let item = StoreItem::from_attributes(attributes);
/// assert_eq!(item.key(), Some("ada@example.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreItem(Map<String, Value>);

impl StoreItem {
    /// Wrap an attribute map.
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// Primary key of the item, if the key attribute is a string.
    pub fn key(&self) -> Option<&str> {
        self.0.get(KEY_ATTRIBUTE).and_then(Value::as_str)
    }

    /// Look up a single attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Borrow all attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the item, returning its attributes.
    pub fn into_attributes(self) -> Map<String, Value> {
        self.0
    }
}
