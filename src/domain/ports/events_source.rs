use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::UpstreamFetchError;
use crate::domain::models::UpstreamQuery;

/// Port trait for the upstream events API
///
/// Returns the raw decoded body. The body is expected to be an array of
/// event records but nothing here guarantees it; shaping is left to the
/// normalizer.
///
/// Implementations must be `Send + Sync` so a single instance can serve
/// concurrent requests.
#[async_trait]
pub trait EventsSource: Send + Sync {
    /// Fetch events matching `query`. Implementations do not retry.
    async fn fetch_events(&self, query: &UpstreamQuery) -> Result<Value, UpstreamFetchError>;
}
