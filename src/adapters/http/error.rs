//! JSON error envelope for the HTTP surface.
//!
//! Every failure leaves the gateway as `{error, details?}` (or
//! `{error, path}` for unknown routes). Internal messages only appear in
//! `details`, and only in a development-labelled environment.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

use crate::domain::errors::{CacheClearError, RetrievalError};

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Event retrieval failed
    #[error("Failed to fetch events")]
    FetchEvents { details: Option<String> },

    /// Manual cache clear failed
    #[error("Failed to clear cache")]
    ClearCache { details: Option<String> },

    /// No route matched
    #[error("Resource not found")]
    NotFound { path: String },

    /// Anything else reaching the top of the pipeline
    #[error("Internal server error")]
    Unhandled { details: Option<String> },
}

impl ApiError {
    pub fn fetch_events(err: &RetrievalError, expose_details: bool) -> Self {
        Self::FetchEvents {
            details: expose_details.then(|| err.to_string()),
        }
    }

    pub fn clear_cache(err: &CacheClearError, expose_details: bool) -> Self {
        Self::ClearCache {
            details: expose_details.then(|| err.to_string()),
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn unhandled(message: impl Into<String>, expose_details: bool) -> Self {
        Self::Unhandled {
            details: expose_details.then(|| message.into()),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::FetchEvents { .. } | Self::ClearCache { .. } | Self::Unhandled { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        let body = match self {
            Self::FetchEvents { details }
            | Self::ClearCache { details }
            | Self::Unhandled { details } => ErrorResponse {
                error,
                details,
                path: None,
            },
            Self::NotFound { path } => ErrorResponse {
                error,
                details: None,
                path: Some(path),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into the generic 500 envelope.
pub fn panic_response(err: Box<dyn Any + Send + 'static>, expose_details: bool) -> Response {
    let message = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(ToString::to_string))
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!(panic = %message, "request handler panicked");

    let mut response = ApiError::unhandled(message, expose_details).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
