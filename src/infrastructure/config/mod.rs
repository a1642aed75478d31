//! Configuration management infrastructure
//!
//! Configuration using figment:
//! - Programmatic defaults
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ENV_KEYS, NUMERIC_KEYS, TEXT_KEYS};
