use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::storage::STORAGE_DIR_ENV;

/// Port the desktop shell expects when `ELECTRON_WEB_PORT` is not set.
pub const DEFAULT_PORT: u16 = 3210;

/// The service only ever listens on loopback; the embedded browser is the sole client.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `DENTIT_STORAGE_DIR`; `None` means `<cwd>/storage`.
    pub root_override: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

impl Environment {
    /// Parse `APP_ENV`, falling back to `default` for unset or unknown values.
    pub fn parse_or(value: Option<&str>, default: Environment) -> Environment {
        match value {
            Some("production") | Some("prod") => Environment::Production,
            Some("development") | Some("dev") => Environment::Development,
            _ => default,
        }
    }

    /// `APP_ENV`, defaulting to production.
    pub fn from_env() -> Environment {
        Self::parse_or(env::var("APP_ENV").ok().as_deref(), Environment::Production)
    }

    /// Default `tracing` directive when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Production => "dentit_api=info,tower_http=info",
            Environment::Development => "dentit_api=debug,tower_http=debug,sqlx=info",
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> Result<&str, ConfigError> {
        self.url.as_deref().ok_or(ConfigError::Missing("DATABASE_URL"))
    }
}

impl AppConfig {
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
    }

    /// Apply overrides from a variable lookup, usually `std::env::var`. Tests
    /// pass a map so they don't have to mutate the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ELECTRON_WEB_PORT") {
            match v.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(
                    "Ignoring invalid ELECTRON_WEB_PORT {:?}, using {}",
                    v,
                    self.server.port
                ),
            }
        }

        self.storage.root_override = lookup(STORAGE_DIR_ENV).filter(|v| !v.is_empty());

        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: LOOPBACK_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            storage: StorageConfig { root_override: None },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: LOOPBACK_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            storage: StorageConfig { root_override: None },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 5,
            },
        }
    }
}
