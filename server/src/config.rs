//! Server configuration from environment variables.

use pantry_core::{ConfigError, MAX_FILE_SIZE};
use std::env;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3100;

/// Which profile store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub store: StoreConfig,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PORT`: listen port (default: 3100)
    /// - `PROFILE_STORE`: "memory" or "postgres" (default: "postgres" if
    ///   `DATABASE_URL` is set, otherwise "memory")
    /// - `DATABASE_URL`: PostgreSQL connection string
    /// - `PANTRY_MAX_UPLOAD_BYTES`: largest accepted image (default: 10MB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or("PORT", &lookup, DEFAULT_PORT)?;
        let max_upload_bytes = parse_or("PANTRY_MAX_UPLOAD_BYTES", &lookup, MAX_FILE_SIZE)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let store = match lookup("PROFILE_STORE").as_deref() {
            Some("memory") => StoreConfig::Memory,
            Some("postgres") => StoreConfig::Postgres {
                database_url: database_url
                    .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "PROFILE_STORE".to_string(),
                    value: other.to_string(),
                })
            }
            None => match database_url {
                Some(database_url) => StoreConfig::Postgres { database_url },
                None => StoreConfig::Memory,
            },
        };

        Ok(Self {
            port,
            store,
            max_upload_bytes,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
