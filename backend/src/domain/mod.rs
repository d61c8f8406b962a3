//! Domain primitives, ports, and services.
//!
//! Purpose: hold the business rules for managing users against a key-value
//! store. Nothing here depends on HTTP or on a concrete store; adapters
//! reach the domain only through [`ports`].
//!
//! Public surface:
//! - [`is_email_valid`] — email syntax check.
//! - [`User`] — the managed resource and its store item encoding.
//! - [`UserError`] — closed error taxonomy for every operation.
//! - [`UserService`] — the CRUD use-cases behind [`ports::UserManagement`].

pub mod email;
pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::email::is_email_valid;
pub use self::error::UserError;
pub use self::user::{ItemCodecError, User};
pub use self::user_service::UserService;
