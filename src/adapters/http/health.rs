use axum::extract::State;
use axum::Json;
use chrono::SecondsFormat;
use serde::Serialize;
use std::sync::Arc;

use super::server::AppState;

/// Liveness report.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub environment: String,
    pub version: &'static str,
}

/// `GET /health`. Never touches upstream or the cache.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: state
            .clock
            .now_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
