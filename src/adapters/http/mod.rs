//! HTTP surface: routes, handlers and the JSON error envelope.

pub mod error;
pub mod events;
pub mod health;
pub mod server;

pub use error::ApiError;
pub use events::EventsQuery;
pub use health::HealthResponse;
pub use server::{
    shutdown_signal, AppState, EventsHttpServer, HttpConfig, ServerError, SHUTDOWN_GRACE,
};
