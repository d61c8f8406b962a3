//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the key-value store) and how driving adapters (HTTP) reach the domain.
//! Store errors are strongly typed so adapters map their failures into
//! predictable variants.

mod store_item;
mod user_management;
mod user_store;

pub use store_item::{KEY_ATTRIBUTE, StoreItem};
#[cfg(test)]
pub use user_management::MockUserManagement;
pub use user_management::UserManagement;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
