pub mod config;
pub mod event;
pub mod query;

pub use config::Config;
pub use event::Event;
pub use query::{QueryOptions, UpstreamQuery, DEFAULT_LIMIT, DEFAULT_LOCATION};
