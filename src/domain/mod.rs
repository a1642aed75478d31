//! Domain layer for the events gateway
//!
//! This module contains the event model, retrieval options, port traits and
//! the error taxonomy shared by services and adapters.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{CacheClearError, RetrievalError, UpstreamFetchError};
