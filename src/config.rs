//! Service configuration, read from the environment.

use std::env;

use thiserror::Error;

use crate::engine::DEFAULT_MAX_RETRIES;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}: '{value}' is not a valid port")]
    InvalidPort { name: &'static str, value: String },

    #[error("{name}: '{value}' is not a positive integer")]
    InvalidNumber { name: &'static str, value: String },

    #[error("STOCK_STORE: unknown backend '{0}' (expected 'redis' or 'memory')")]
    UnknownStore(String),
}

/// Which counter store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub redis_host: String,
    pub redis_port: u16,
    pub max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = match lookup("STOCK_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("redis") => StoreBackend::Redis,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self {
            host: lookup("STOCK_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: port(&lookup, "STOCK_PORT", 1245)?,
            store,
            redis_host: lookup("REDIS_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            redis_port: port(&lookup, "REDIS_PORT", 6379)?,
            max_retries: positive(&lookup, "RESERVE_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}

fn port(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u16,
) -> Result<u16, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(ConfigError::InvalidPort { name, value }),
        },
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:1245");
        assert_eq!(config.redis_url(), "redis://127.0.0.1:6379/");
        assert_eq!(config.store, StoreBackend::Redis);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("STOCK_PORT", "8080"),
            ("REDIS_HOST", "cache"),
            ("REDIS_PORT", "6380"),
            ("RESERVE_MAX_RETRIES", "4"),
            ("STOCK_STORE", "memory"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.redis_url(), "redis://cache:6380/");
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_eq!(
            config(&[("STOCK_PORT", "http")]),
            Err(ConfigError::InvalidPort {
                name: "STOCK_PORT",
                value: "http".to_string()
            })
        );
        assert!(config(&[("REDIS_PORT", "0")]).is_err());
    }

    #[test]
    fn zero_retries_is_rejected() {
        assert!(matches!(
            config(&[("RESERVE_MAX_RETRIES", "0")]),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn unknown_store_is_rejected() {
        assert_eq!(
            config(&[("STOCK_STORE", "postgres")]),
            Err(ConfigError::UnknownStore("postgres".to_string()))
        );
    }
}
