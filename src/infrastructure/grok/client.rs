use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::UpstreamFetchError;
use crate::domain::models::{Config, UpstreamQuery};
use crate::domain::ports::EventsSource;

/// Configuration for the Grok events client
#[derive(Debug, Clone)]
pub struct GrokClientConfig {
    /// Bearer token; the Authorization header is omitted when absent
    pub api_key: Option<String>,

    /// Full URL of the events endpoint
    pub events_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GrokClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            events_url: "https://api.grok.io/events".to_string(),
            timeout_secs: 10,
        }
    }
}

impl From<&Config> for GrokClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.xai_api_key.clone(),
            events_url: config.upstream_url.clone(),
            timeout_secs: config.upstream_timeout_secs,
        }
    }
}

/// HTTP client for the upstream events API
///
/// - Connection pooling and reuse
/// - Client-side timeout so a stalled upstream cannot hang a request
/// - No retries: every failure surfaces as an [`UpstreamFetchError`]
pub struct GrokEventsClient {
    http_client: ReqwestClient,
    events_url: String,
    timeout_secs: u64,
}

impl GrokEventsClient {
    /// Create a new client
    ///
    /// # Errors
    /// Fails when the API key cannot be used as a header value or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: GrokClientConfig) -> Result<Self, UpstreamFetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        match config.api_key {
            Some(ref api_key) => {
                let mut value = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
                    .map_err(|e| {
                        UpstreamFetchError::InvalidRequest(format!("Invalid API key: {e}"))
                    })?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
            None => warn!("XAI_API_KEY is not set, upstream requests will be unauthenticated"),
        }

        info!(
            events_url = %config.events_url,
            timeout_secs = config.timeout_secs,
            api_key = %redact(config.api_key.as_deref()),
            "initializing upstream events client"
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(|e| UpstreamFetchError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            http_client,
            events_url: config.events_url,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Handle HTTP response and decode the JSON body
    async fn handle_response(&self, response: Response) -> Result<Value, UpstreamFetchError> {
        let status = response.status();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!("Upstream error ({}): {}", status, body);
            return Err(UpstreamFetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamFetchError::Decode(e.to_string()))
    }

    fn classify(&self, err: &reqwest::Error) -> UpstreamFetchError {
        if err.is_timeout() {
            UpstreamFetchError::Timeout(self.timeout_secs)
        } else {
            UpstreamFetchError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl EventsSource for GrokEventsClient {
    #[instrument(skip(self), fields(url = %self.events_url))]
    async fn fetch_events(&self, query: &UpstreamQuery) -> Result<Value, UpstreamFetchError> {
        debug!("GET {}", self.events_url);

        let response = self
            .http_client
            .get(&self.events_url)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        self.handle_response(response).await
    }
}

/// Keep only a short prefix of the key for logs.
fn redact(api_key: Option<&str>) -> String {
    match api_key {
        Some(key) if key.len() > 8 && key.is_char_boundary(8) => {
            format!("{}...[REDACTED]", &key[..8])
        }
        Some(_) => "[REDACTED]".to_string(),
        None => "<unset>".to_string(),
    }
}
