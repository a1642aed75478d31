//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the services depend on:
//! - EventsSource: the upstream events API
//! - Clock: monotonic and wall-clock time
//!
//! Infrastructure adapters implement these so the retrieval path can be
//! exercised with fakes in tests.

pub mod clock;
pub mod events_source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events_source::EventsSource;
