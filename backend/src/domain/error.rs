//! Domain error taxonomy for user management.
//!
//! Errors are transport agnostic. Each variant's `Display` text is the
//! message returned to clients; inbound adapters decide the status code by
//! matching on the variant.

use thiserror::Error;

/// Failure outcome of a user management operation.
///
/// The set is closed: adapters match it exhaustively, so adding a variant is
/// a breaking change for every boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum UserError {
    /// The request body could not be decoded into a user.
    #[error("invalid user data")]
    InvalidUserData,
    /// The email address failed syntax validation.
    #[error("invalid email")]
    InvalidEmail,
    /// A create targeted an email that is already stored.
    #[error("user already exists")]
    UserAlreadyExists,
    /// A read or mutation targeted an email that is not stored.
    #[error("user does not exist")]
    UserDoesNotExist,
    /// The store lookup itself failed.
    #[error("error get user")]
    StorageFailure,
    /// A user could not be encoded into a store item.
    #[error("error marshal item")]
    SerializationFailure,
    /// A stored item could not be decoded into a user.
    #[error("error unmarshal item")]
    DeserializationFailure,
    /// The store rejected the write of a new user.
    #[error("error create user")]
    CreateFailure,
    /// The store rejected the overwrite of an existing user.
    #[error("error update user")]
    UpdateFailure,
    /// The store rejected the removal of an existing user.
    #[error("error delete user")]
    DeleteFailure,
}

#[cfg(test)]
mod tests;
