//! Grok events API integration
//!
//! reqwest-based implementation of the `EventsSource` port.

pub mod client;

pub use client::{GrokClientConfig, GrokEventsClient};
