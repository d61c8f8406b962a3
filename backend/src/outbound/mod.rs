//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local store for development and tests
//! - **redis**: Redis-backed store reached through a `bb8` pool
//!
//! Adapters are thin translators between store items and the backend's wire
//! representation. They contain no business logic.

pub mod memory;
pub mod redis;
