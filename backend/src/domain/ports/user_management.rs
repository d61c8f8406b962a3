//! Driving port for user management use-cases.
//!
//! Inbound adapters depend on this trait instead of the concrete service so
//! handlers can be exercised with mocks.

use async_trait::async_trait;

use crate::domain::{User, UserError};

/// Create, read, update, and delete operations on users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// Fetch the user stored under `email`.
    async fn get_user(&self, email: &str) -> Result<User, UserError>;

    /// Decode `raw_body` and store it as a new user.
    async fn create_user(&self, raw_body: &[u8]) -> Result<User, UserError>;

    /// Decode `raw_body` and overwrite the existing user with the same email.
    async fn update_user(&self, raw_body: &[u8]) -> Result<User, UserError>;

    /// Remove the user stored under `email`.
    async fn delete_user(&self, email: &str) -> Result<(), UserError>;
}
