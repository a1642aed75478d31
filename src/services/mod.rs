//! Service layer
//!
//! Business logic for event retrieval: the response normalizer, the
//! single-slot cache and the orchestrator that ties them to the upstream
//! source.

pub mod event_cache;
pub mod event_normalizer;
pub mod event_service;

pub use event_cache::{CacheSettings, EventCache};
pub use event_normalizer::normalize;
pub use event_service::EventService;
