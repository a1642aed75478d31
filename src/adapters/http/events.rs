//! `/api/events` handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::error::ApiError;
use super::server::AppState;
use crate::domain::models::{Event, QueryOptions};

/// Raw query parameters of `GET /api/events`.
///
/// Kept as text so malformed values never reject the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
}

impl EventsQuery {
    /// Lenient conversion; anything unparsable falls back to its default.
    pub fn into_options(self) -> QueryOptions {
        QueryOptions {
            start_date: self.start_date.as_deref().and_then(|raw| date_param("startDate", raw)),
            end_date: self.end_date.as_deref().and_then(|raw| date_param("endDate", raw)),
            limit: self.limit.as_deref().and_then(parse_limit),
        }
    }
}

/// Response of `POST /api/events/cache/clear`.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    success: bool,
    message: &'static str,
}

/// List Tokyo events.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Json<Arc<[Event]>>, ApiError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable query string, using defaults");
            EventsQuery::default()
        }
    };
    debug!(?query, "events request received");

    let events = state
        .event_service
        .get_events(query.into_options())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to serve events");
            ApiError::fetch_events(&e, state.config.expose_details())
        })?;

    info!(count = events.len(), "returning events");
    Ok(Json(events))
}

/// Manually drop the cached events.
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearCacheResponse>, ApiError> {
    state.event_service.clear_cache().map_err(|e| {
        error!(error = %e, "failed to clear cache");
        ApiError::clear_cache(&e, state.config.expose_details())
    })?;

    info!("cache cleared manually");
    Ok(Json(ClearCacheResponse {
        success: true,
        message: "Cache cleared",
    }))
}

fn date_param(name: &str, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_date(raw);
    if parsed.is_none() {
        warn!(param = name, value = raw, "ignoring unparsable date");
    }
    parsed
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC) and `YYYY-MM-DD` (UTC midnight).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Leading decimal digits, like `parseInt`; zero, negative or unparsable
/// values yield `None`.
pub fn parse_limit(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());

    raw[..end].parse::<u32>().ok().filter(|limit| *limit > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("10"), Some(10));
        assert_eq!(parse_limit(" 25"), Some(25));
        assert_eq!(parse_limit("+7"), Some(7));
        assert_eq!(parse_limit("10abc"), Some(10));
        assert_eq!(parse_limit("abc"), None);
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("0"), None);
        assert_eq!(parse_limit("-5"), None);
        assert_eq!(parse_limit("99999999999"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(
            parse_date("2025-03-15"),
            Some(Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_date("2025-03-15T10:30:00"),
            Some(Utc.with_ymd_and_hms(2025, 3, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_date("2025-03-15T01:00:00+09:00"),
            Some(Utc.with_ymd_and_hms(2025, 3, 14, 16, 0, 0).unwrap())
        );
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2025-13-01"), None);
    }

    #[test]
    fn test_into_options_is_lenient() {
        let options = EventsQuery {
            start_date: Some("2025-03-15".to_string()),
            end_date: Some("garbage".to_string()),
            limit: Some("ten".to_string()),
        }
        .into_options();

        assert_eq!(
            options.start_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap())
        );
        assert!(options.end_date.is_none());
        assert!(options.limit.is_none());
    }
}
