//! Retrieval orchestrator for Tokyo events.
//!
//! Serves the cache slot when it is fresh, otherwise resolves defaults,
//! calls upstream once, normalizes the body and refreshes the slot.

use chrono::{DateTime, Datelike, Days, Months, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::domain::errors::{CacheClearError, RetrievalError};
use crate::domain::models::{Event, QueryOptions, UpstreamQuery, DEFAULT_LIMIT, DEFAULT_LOCATION};
use crate::domain::ports::{Clock, EventsSource};
use crate::services::event_cache::EventCache;
use crate::services::event_normalizer::normalize;

/// Event retrieval service
pub struct EventService {
    source: Arc<dyn EventsSource>,
    cache: EventCache,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(source: Arc<dyn EventsSource>, cache: EventCache, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache,
            clock,
        }
    }

    pub const fn cache(&self) -> &EventCache {
        &self.cache
    }

    /// Get events for the requested range.
    ///
    /// On a cache hit the options are ignored and the last stored batch is
    /// returned as-is.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_events(&self, options: QueryOptions) -> Result<Arc<[Event]>, RetrievalError> {
        debug!("starting event retrieval");

        if let Some(cached) = self.cache.get_valid() {
            debug!(count = cached.len(), "returning events from cache");
            return Ok(cached);
        }

        let query = self.resolve_query(&options);
        debug!(params = ?query.params(), "sending upstream request");

        let raw = self.source.fetch_events(&query).await.map_err(|e| {
            error!(error = %e, "event retrieval failed");
            RetrievalError::from(e)
        })?;

        let events: Arc<[Event]> = normalize(&raw).into();
        self.cache.put(Arc::clone(&events));

        info!(count = events.len(), "fetched events from upstream");
        Ok(events)
    }

    /// Drop whatever the cache slot holds.
    pub fn clear_cache(&self) -> Result<(), CacheClearError> {
        self.cache.clear()
    }

    /// Fill in defaults: start is now, end is one month from now, limit 30.
    fn resolve_query(&self, options: &QueryOptions) -> UpstreamQuery {
        let now = self.clock.now_utc();
        let start = options.start_date.unwrap_or(now);
        let end = options.end_date.unwrap_or_else(|| one_month_after(now));

        UpstreamQuery {
            location: DEFAULT_LOCATION.to_string(),
            start_date: start.date_naive(),
            end_date: end.date_naive(),
            limit: options.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// Same day-of-month in the next month. Days the next month lacks spill
/// over into the month after (Jan 31 -> Mar 3 in 2025).
fn one_month_after(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|first| first.checked_add_days(Days::new(u64::from(now.day0()))))
        .unwrap_or(now)
}
