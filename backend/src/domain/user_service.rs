//! User management domain service.
//!
//! Implements the [`UserManagement`] driving port on top of a [`UserStore`].
//! Every mutation is guarded by an explicit existence check. The check and
//! the write are separate store round trips, so two concurrent creates of the
//! same email can both pass the check; the last write wins. Enable
//! [`UserService::with_conditional_create`] to close that gap for creates
//! with the store's create-if-absent primitive.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{StoreItem, UserManagement, UserStore};
use crate::domain::{User, UserError, is_email_valid};

/// User service implementing the driving port.
pub struct UserService<S> {
    store: Arc<S>,
    conditional_create: bool,
}

impl<S> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            conditional_create: self.conditional_create,
        }
    }
}

impl<S> UserService<S> {
    /// Create a service over the given store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            conditional_create: false,
        }
    }

    /// Use the store's create-if-absent write for new users.
    #[must_use]
    pub fn with_conditional_create(mut self, enabled: bool) -> Self {
        self.conditional_create = enabled;
        self
    }

    fn decode_body(raw_body: &[u8]) -> Result<User, UserError> {
        User::from_json(raw_body).map_err(|err| {
            debug!(error = %err, "request body is not a user");
            UserError::InvalidUserData
        })
    }

    fn encode(user: &User) -> Result<StoreItem, UserError> {
        user.to_item().map_err(|err| {
            error!(email = %user.email, error = %err, "failed to encode user item");
            UserError::SerializationFailure
        })
    }
}

impl<S> UserService<S>
where
    S: UserStore,
{
    async fn fetch_user(&self, email: &str) -> Result<User, UserError> {
        let item = self.store.get(email).await.map_err(|err| {
            error!(email, error = %err, "failed to get user");
            UserError::StorageFailure
        })?;
        let Some(item) = item else {
            return Err(UserError::UserDoesNotExist);
        };
        User::from_item(item).map_err(|err| {
            error!(email, error = %err, "failed to decode user item");
            UserError::DeserializationFailure
        })
    }

    async fn insert_new(&self, item: &StoreItem, email: &str) -> Result<(), UserError> {
        if !self.conditional_create {
            return self.store.put(item).await.map_err(|err| {
                error!(email, error = %err, "failed to create user");
                UserError::CreateFailure
            });
        }

        let created = self.store.put_if_absent(item).await.map_err(|err| {
            error!(email, error = %err, "failed to create user");
            UserError::CreateFailure
        })?;
        if created {
            Ok(())
        } else {
            warn!(email, "user appeared between existence check and write");
            Err(UserError::UserAlreadyExists)
        }
    }
}

#[async_trait]
impl<S> UserManagement for UserService<S>
where
    S: UserStore,
{
    async fn get_user(&self, email: &str) -> Result<User, UserError> {
        self.fetch_user(email).await
    }

    async fn create_user(&self, raw_body: &[u8]) -> Result<User, UserError> {
        let candidate = Self::decode_body(raw_body)?;
        if !is_email_valid(&candidate.email) {
            debug!(email = %candidate.email, "rejected malformed email");
            return Err(UserError::InvalidEmail);
        }

        match self.fetch_user(&candidate.email).await {
            Ok(_) => return Err(UserError::UserAlreadyExists),
            Err(UserError::UserDoesNotExist) => {}
            Err(_) => return Err(UserError::StorageFailure),
        }

        let item = Self::encode(&candidate)?;
        self.insert_new(&item, &candidate.email).await?;
        info!(email = %candidate.email, "user created");
        Ok(candidate)
    }

    async fn update_user(&self, raw_body: &[u8]) -> Result<User, UserError> {
        let candidate = Self::decode_body(raw_body)?;
        self.fetch_user(&candidate.email).await?;

        let item = Self::encode(&candidate)?;
        self.store.put(&item).await.map_err(|err| {
            error!(email = %candidate.email, error = %err, "failed to update user");
            UserError::UpdateFailure
        })?;
        info!(email = %candidate.email, "user updated");
        Ok(candidate)
    }

    async fn delete_user(&self, email: &str) -> Result<(), UserError> {
        self.fetch_user(email).await?;

        self.store.delete(email).await.map_err(|err| {
            error!(email, error = %err, "failed to delete user");
            UserError::DeleteFailure
        })?;
        info!(email, "user deleted");
        Ok(())
    }
}
