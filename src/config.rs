use std::env;
use thiserror::Error;

use crate::db::SQLITE_MEMORY_URL;

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_STORAGE_BACKEND: &str = "STORAGE_BACKEND";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const ENV_SEARCH_CASE_SENSITIVE: &str = "SEARCH_CASE_SENSITIVE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Sqlite {
        database_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub search_case_sensitive: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST).unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, ENV_PORT, 8080u16)?;
        let search_case_sensitive = parse_bool(&lookup, ENV_SEARCH_CASE_SENSITIVE, false)?;

        let backend = lookup(ENV_STORAGE_BACKEND).unwrap_or_else(|| "postgres".to_string());
        let storage = match backend.trim().to_lowercase().as_str() {
            "postgres" => StorageBackend::Postgres {
                database_url: lookup(ENV_DATABASE_URL)
                    .filter(|url| !url.is_empty())
                    .ok_or(ConfigError::Missing(ENV_DATABASE_URL))?,
                max_connections: parse_or(&lookup, ENV_DATABASE_MAX_CONNECTIONS, 5u32)?,
            },
            "sqlite" => StorageBackend::Sqlite {
                database_url: lookup(ENV_DATABASE_URL)
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| SQLITE_MEMORY_URL.to_string()),
            },
            "memory" => StorageBackend::Sqlite {
                database_url: SQLITE_MEMORY_URL.to_string(),
            },
            _ => {
                return Err(ConfigError::Invalid {
                    name: ENV_STORAGE_BACKEND,
                    value: backend,
                })
            }
        };

        Ok(Self {
            host,
            port,
            storage,
            search_case_sensitive,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value }),
        },
        None => Ok(default),
    }
}
