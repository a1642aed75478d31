//! Tokyo Events - HTTP gateway for an upstream events API
//!
//! Proxies event listings for Tokyo from the Grok events API, reshapes each
//! record into a fixed [`Event`] shape and optionally keeps the last batch in
//! a single time-limited cache slot.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain Layer** (`domain`): models, errors and the ports other layers plug into
//! - **Service Layer** (`services`): retrieval orchestration, caching, normalization
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, upstream client
//! - **Adapters** (`adapters`): the axum HTTP surface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokyo_events::{CacheSettings, EventCache, EventService, SystemClock};
//!
//! let clock = Arc::new(SystemClock);
//! let cache = EventCache::new(CacheSettings::default(), clock.clone());
//! let service = EventService::new(source, cache, clock);
//! let events = service.get_events(Default::default()).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::http::{ApiError, EventsHttpServer, HttpConfig};
pub use domain::errors::{CacheClearError, RetrievalError, UpstreamFetchError};
pub use domain::models::{Config, Event, QueryOptions, UpstreamQuery};
pub use domain::ports::{Clock, EventsSource, ManualClock, SystemClock};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::grok::{GrokClientConfig, GrokEventsClient};
pub use infrastructure::logging::{LogConfig, LoggerImpl};
pub use services::{CacheSettings, EventCache, EventService};
