//! User data model and its store item encoding.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::ports::StoreItem;

/// Registered user, keyed by email.
///
/// ## Invariants
/// - `email` identifies the user and never changes after creation; updates
///   address the record by it.
/// - `first_name` and `last_name` are free-form.
///
/// Decoding is lenient: keys match case-insensitively, absent or `null`
/// fields leave empty strings, and unknown keys are skipped. The body must
/// still be a JSON object, and a present field must be a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Given name.
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Lovelace")]
    pub last_name: String,
}

impl User {
    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        if key.eq_ignore_ascii_case("email") {
            Some(&mut self.email)
        } else if key.eq_ignore_ascii_case("firstName") {
            Some(&mut self.first_name)
        } else if key.eq_ignore_ascii_case("lastName") {
            Some(&mut self.last_name)
        } else {
            None
        }
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UserVisitor)
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a user object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<User, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut user = User::default();
        while let Some(key) = map.next_key::<String>()? {
            match user.field_mut(&key) {
                // Later keys overwrite earlier ones; `null` keeps what is there.
                Some(slot) => {
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        *slot = value;
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(user)
    }
}

/// Errors raised while converting between [`User`] and [`StoreItem`].
#[derive(Debug, Error)]
pub enum ItemCodecError {
    /// The user did not serialise to a flat attribute map.
    #[error("user did not encode to an attribute map")]
    NotAnObject,
    /// JSON conversion failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl User {
    /// Build a user from its parts.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Decode a user from a JSON request body.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::User;
    ///
    /// let user = User::from_json(br#"{"email":"a@b.com","firstName":"A","lastName":"B"}"#)
    ///     .expect("valid body");
    /// assert_eq!(user, User::new("a@b.com", "A", "B"));
    /// ```
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Encode the user into the attribute map persisted by store adapters.
    pub fn to_item(&self) -> Result<StoreItem, ItemCodecError> {
        match serde_json::to_value(self)? {
            Value::Object(attributes) => Ok(StoreItem::from_attributes(attributes)),
            _ => Err(ItemCodecError::NotAnObject),
        }
    }

    /// Decode a user from a stored item.
    pub fn from_item(item: StoreItem) -> Result<Self, ItemCodecError> {
        Ok(serde_json::from_value(Value::Object(item.into_attributes()))?)
    }
}
