use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings for the gateway.
///
/// Field names match the lowercased environment variables they are read
/// from (`PORT` -> `port`, `ENABLE_CACHE` -> `enable_cache`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Listen port
    #[serde(default = "default_port", deserialize_with = "env_value::unsigned")]
    pub port: u16,

    /// Interface to bind
    #[serde(default = "default_bind_host", deserialize_with = "env_value::text")]
    pub bind_host: String,

    /// Environment label; error details are exposed only for `development`
    #[serde(default = "default_node_env", deserialize_with = "env_value::text")]
    pub node_env: String,

    /// Bearer token for the upstream API
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "env_value::optional_text"
    )]
    pub xai_api_key: Option<String>,

    /// Enables debug-level output and access logging
    #[serde(default, deserialize_with = "env_value::flag")]
    pub debug_mode: bool,

    /// Log level: error, warn, info, debug
    #[serde(default = "default_log_level", deserialize_with = "env_value::text")]
    pub log_level: String,

    /// Log format: pretty or json
    #[serde(default = "default_log_format", deserialize_with = "env_value::text")]
    pub log_format: String,

    /// Directory for rolling JSON log files
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "env_value::optional_text"
    )]
    pub log_dir: Option<String>,

    /// Serve repeated requests from the cache slot
    #[serde(default, deserialize_with = "env_value::flag")]
    pub enable_cache: bool,

    /// Cache time-to-live in seconds
    #[serde(
        default = "default_cache_duration",
        deserialize_with = "env_value::unsigned"
    )]
    pub cache_duration: u64,

    /// Upstream events endpoint
    #[serde(default = "default_upstream_url", deserialize_with = "env_value::text")]
    pub upstream_url: String,

    /// Client-side timeout for the upstream call, in seconds
    #[serde(
        default = "default_upstream_timeout_secs",
        deserialize_with = "env_value::unsigned"
    )]
    pub upstream_timeout_secs: u64,
}

const fn default_port() -> u16 {
    3000
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_node_env() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const fn default_cache_duration() -> u64 {
    3600
}

fn default_upstream_url() -> String {
    "https://api.grok.io/events".to_string()
}

const fn default_upstream_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_host: default_bind_host(),
            node_env: default_node_env(),
            xai_api_key: None,
            debug_mode: false,
            log_level: default_log_level(),
            log_format: default_log_format(),
            log_dir: None,
            enable_cache: false,
            cache_duration: default_cache_duration(),
            upstream_url: default_upstream_url(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

impl Config {
    /// True when running in a development-labelled environment.
    pub fn is_development(&self) -> bool {
        self.node_env == "development"
    }

    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }

    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

/// Deserializers for raw environment values.
///
/// Environment providers may hand over a value already typed (`true`, `3000`)
/// or as plain text, so each helper accepts any scalar.
mod env_value {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    impl Scalar {
        fn into_text(self) -> String {
            match self {
                Self::Bool(b) => b.to_string(),
                Self::Unsigned(n) => n.to_string(),
                Self::Signed(n) => n.to_string(),
                Self::Float(n) => n.to_string(),
                Self::Text(s) => s,
            }
        }
    }

    /// Only the literal `true` enables a flag.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Scalar::deserialize(deserializer)? {
            Scalar::Bool(b) => b,
            Scalar::Text(s) => s == "true",
            _ => false,
        })
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Scalar::deserialize(deserializer).map(Scalar::into_text)
    }

    pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?
            .map(Scalar::into_text)
            .filter(|s| !s.is_empty()))
    }

    pub fn unsigned<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let value = match Scalar::deserialize(deserializer)? {
            Scalar::Unsigned(n) => n,
            Scalar::Signed(n) => u64::try_from(n).map_err(|_| {
                D::Error::custom(format!("expected a non-negative integer, found {n}"))
            })?,
            Scalar::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| D::Error::custom(format!("expected an integer, found `{s}`")))?,
            other => {
                return Err(D::Error::custom(format!(
                    "expected an integer, found `{}`",
                    other.into_text()
                )))
            }
        };

        T::try_from(value)
            .map_err(|_| D::Error::custom(format!("integer {value} is out of range")))
    }
}
