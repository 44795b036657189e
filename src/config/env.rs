//! Process environment configuration for the signup store

use std::time::Duration;

pub const STORE_URL_VAR: &str = "UPSTASH_REDIS_REST_URL";
pub const STORE_TOKEN_VAR: &str = "UPSTASH_REDIS_REST_TOKEN";
pub const SITE_ID_VAR: &str = "SITE_ID";
pub const STORE_TIMEOUT_VAR: &str = "STORE_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the hosted key-value store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub token: String,
    pub site_id: String,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Read the store settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the store settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let url = required(STORE_URL_VAR)?;
        let token = required(STORE_TOKEN_VAR)?;
        let site_id = required(SITE_ID_VAR)?;

        let timeout = match lookup(STORE_TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    name: STORE_TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            url,
            token,
            site_id,
            timeout,
        })
    }
}
