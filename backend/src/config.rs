use std::env;
use std::str::FromStr;

use thiserror::Error;

/// The API always listens here.
pub const LISTEN_ADDR: &str = "0.0.0.0:3000";

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown store backend `{0}` (expected `redis` or `memory`)")]
    UnknownStore(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let redis_url = lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());
        let store = lookup("STORE")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();

        Ok(Self { redis_url, store })
    }
}
