//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the [`UserManagement`] port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserManagement;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User management use-cases.
    pub users: Arc<dyn UserManagement>,
}

impl HttpState {
    /// Construct state around a user management implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_registry::domain::UserService;
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::memory::InMemoryUserStore;
    ///
    /// let service = UserService::new(Arc::new(InMemoryUserStore::new("users")));
    /// let state = HttpState::new(Arc::new(service));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserManagement>) -> Self {
        Self { users }
    }
}
