//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - Grok events API client
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod grok;
pub mod logging;
