//! Request middleware.

pub mod trace;

pub use trace::{RequestId, RequestTrace};
