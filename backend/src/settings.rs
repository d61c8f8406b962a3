//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `USER_REGISTRY_*` environment variables, an optional
//! configuration file, and command-line flags, in OrthoConfig's usual order
//! of precedence.

use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default table (Redis key namespace) for stored users.
pub const DEFAULT_TABLE_NAME: &str = "golang-serverless-user";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr {
        /// Raw configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The store backend name is not recognised.
    #[error("unknown store backend `{0}`; expected `memory` or `redis`")]
    UnknownStore(String),
    /// The redis backend was selected without a URL.
    #[error("the redis store requires USER_REGISTRY_REDIS_URL")]
    MissingRedisUrl,
    /// The table name is blank.
    #[error("table name must not be empty")]
    EmptyTableName,
}

/// Which store adapter backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map; data is lost on restart.
    Memory,
    /// Redis server at the configured URL.
    Redis,
}

impl FromStr for StoreBackend {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            _ => Err(SettingsError::UnknownStore(value.to_owned())),
        }
    }
}

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct UserRegistrySettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Table name; used as the Redis key namespace.
    pub table_name: Option<String>,
    /// Store backend, `memory` or `redis`.
    pub store: Option<String>,
    /// Redis connection URL, required by the redis backend.
    pub redis_url: Option<String>,
    /// Use create-if-absent writes for new users.
    #[ortho_config(default = false)]
    pub conditional_create: bool,
}

impl UserRegistrySettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Configured table name, falling back to [`DEFAULT_TABLE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyTableName`] for a blank value.
    pub fn table_name(&self) -> Result<&str, SettingsError> {
        let name = self.table_name.as_deref().unwrap_or(DEFAULT_TABLE_NAME);
        if name.trim().is_empty() {
            return Err(SettingsError::EmptyTableName);
        }
        Ok(name)
    }

    /// Configured store backend, falling back to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownStore`] for unrecognised values.
    pub fn store(&self) -> Result<StoreBackend, SettingsError> {
        self.store
            .as_deref()
            .map_or(Ok(StoreBackend::Memory), StoreBackend::from_str)
    }

    /// Redis URL for the redis backend.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingRedisUrl`] when unset or blank.
    pub fn redis_url(&self) -> Result<&str, SettingsError> {
        self.redis_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingRedisUrl)
    }
}
