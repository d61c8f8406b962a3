//! Builds the HTTP state from settings by selecting a store adapter.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use user_registry::domain::UserService;
use user_registry::domain::ports::{UserStore, UserStoreError};
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::memory::InMemoryUserStore;
use user_registry::outbound::redis::{RedisPool, RedisPoolConfig, RedisUserStore};
use user_registry::settings::{SettingsError, StoreBackend, UserRegistrySettings};

/// Failures while assembling the service at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to open the user store: {0}")]
    Store(#[from] UserStoreError),
}

fn wrap_service<S>(store: S, conditional_create: bool) -> HttpState
where
    S: UserStore + 'static,
{
    let service = UserService::new(Arc::new(store)).with_conditional_create(conditional_create);
    HttpState::new(Arc::new(service))
}

/// Build handler state for the configured store backend.
///
/// # Errors
/// Returns [`StartupError`] when settings are invalid or Redis is unreachable.
pub async fn build_http_state(settings: &UserRegistrySettings) -> Result<HttpState, StartupError> {
    let table = settings.table_name()?;
    let conditional_create = settings.conditional_create;

    match settings.store()? {
        StoreBackend::Memory => {
            info!(table, conditional_create, "using in-memory user store");
            Ok(wrap_service(InMemoryUserStore::new(table), conditional_create))
        }
        StoreBackend::Redis => {
            let redis_url = settings.redis_url()?;
            let pool = RedisPool::connect(RedisPoolConfig::new(redis_url)).await?;
            info!(table, conditional_create, "using redis user store");
            Ok(wrap_service(RedisUserStore::new(pool, table), conditional_create))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn settings() -> UserRegistrySettings {
        UserRegistrySettings {
            bind_addr: None,
            table_name: None,
            store: None,
            redis_url: None,
            conditional_create: false,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn memory_backend_builds_working_state(settings: UserRegistrySettings) {
        let state = build_http_state(&settings).await.expect("state builds");

        let created = state
            .users
            .create_user(br#"{"email":"a@b.com","firstName":"A","lastName":"B"}"#)
            .await
            .expect("user created");
        let fetched = state.users.get_user("a@b.com").await.expect("user fetched");
        assert_eq!(created, fetched);
    }

    #[rstest]
    #[tokio::test]
    async fn redis_backend_without_url_is_rejected(mut settings: UserRegistrySettings) {
        settings.store = Some("redis".to_owned());

        let result = build_http_state(&settings).await;
        assert!(matches!(
            result,
            Err(StartupError::Settings(SettingsError::MissingRedisUrl))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_backend_is_rejected(mut settings: UserRegistrySettings) {
        settings.store = Some("sqlite".to_owned());

        let result = build_http_state(&settings).await;
        assert!(matches!(
            result,
            Err(StartupError::Settings(SettingsError::UnknownStore(_)))
        ));
    }
}
