//! User registry library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the user rules and
//! ports, [`inbound`] adapts HTTP requests onto them, and [`outbound`]
//! provides the key-value store adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
