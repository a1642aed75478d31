//! Domain errors for the events gateway.

use thiserror::Error;

/// Failure while talking to the upstream events API.
///
/// Every variant renders the original underlying message so callers can
/// surface it unchanged.
#[derive(Debug, Error)]
pub enum UpstreamFetchError {
    /// Connection, DNS or TLS failure
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the client-side timeout
    #[error("Upstream request timed out after {0}s")]
    Timeout(u64),

    /// Upstream answered with a non-2xx status
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not valid JSON
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    /// The request could not be built (e.g. an API key with illegal header bytes)
    #[error("Invalid upstream request: {0}")]
    InvalidRequest(String),
}

/// Failure of the retrieval orchestrator.
///
/// Wraps the upstream error at the service boundary; the upstream message is
/// kept as a substring of this error's message.
#[derive(Debug, Error)]
#[error("Failed to retrieve events: {source}")]
pub struct RetrievalError {
    #[from]
    source: UpstreamFetchError,
}

impl RetrievalError {
    /// The upstream failure that caused this error.
    pub const fn upstream(&self) -> &UpstreamFetchError {
        &self.source
    }
}

/// Failure while clearing the cache slot.
#[derive(Debug, Error)]
pub enum CacheClearError {
    /// A writer panicked while holding the slot
    #[error("Cache slot is corrupted: {0}")]
    Corrupted(String),
}
