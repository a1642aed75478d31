use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Environment variables the gateway reads.
pub const ENV_KEYS: [&str; 12] = [
    "PORT",
    "BIND_HOST",
    "NODE_ENV",
    "XAI_API_KEY",
    "DEBUG_MODE",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "LOG_DIR",
    "ENABLE_CACHE",
    "CACHE_DURATION",
    "UPSTREAM_URL",
    "UPSTREAM_TIMEOUT_SECS",
];

/// Integer settings, parsed by figment's env provider.
pub const NUMERIC_KEYS: [&str; 3] = ["PORT", "CACHE_DURATION", "UPSTREAM_TIMEOUT_SECS"];

/// Settings taken verbatim as strings. Flags are here too so only the exact
/// text `true` enables them.
pub const TEXT_KEYS: [&str; 9] = [
    "BIND_HOST",
    "NODE_ENV",
    "XAI_API_KEY",
    "DEBUG_MODE",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "LOG_DIR",
    "ENABLE_CACHE",
    "UPSTREAM_URL",
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid upstream URL: {0}. Must start with http:// or https://")]
    InvalidUpstreamUrl(String),

    #[error("Invalid upstream timeout: {0}. Must be at least 1 second")]
    InvalidUpstreamTimeout(u64),

    #[error("Bind host cannot be empty")]
    EmptyBindHost,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. Environment variables listed in [`ENV_KEYS`]
    ///
    /// Text keys bypass figment's value inference, which would otherwise turn
    /// an API key like `00123456` into the number `123456`.
    pub fn load() -> Result<Config> {
        Self::load_from(Self::figment())
    }

    /// The figment used by [`ConfigLoader::load`].
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&NUMERIC_KEYS))
            .merge(Serialized::defaults(text_env()))
    }

    /// Extract and validate configuration from any figment
    pub fn load_from(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .context("Failed to extract configuration from environment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["error", "warn", "info", "debug"];
        if !valid_log_levels.contains(&config.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.log_level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.log_format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.log_format.clone()));
        }

        if !(config.upstream_url.starts_with("http://")
            || config.upstream_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidUpstreamUrl(config.upstream_url.clone()));
        }

        if config.upstream_timeout_secs == 0 {
            return Err(ConfigError::InvalidUpstreamTimeout(
                config.upstream_timeout_secs,
            ));
        }

        if config.bind_host.trim().is_empty() {
            return Err(ConfigError::EmptyBindHost);
        }

        Ok(())
    }
}

/// Raw string values of [`TEXT_KEYS`] that are set, keyed by field name.
fn text_env() -> BTreeMap<String, String> {
    TEXT_KEYS
        .iter()
        .filter_map(|key| {
            env::var(key)
                .ok()
                .map(|value| (key.to_ascii_lowercase(), value))
        })
        .collect()
}
