//! Common test utilities for integration tests
//!
//! Provides shared fixtures and a scripted upstream source used across
//! multiple integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use tokyo_events::domain::ports::Clock;
use tokyo_events::{
    CacheSettings, EventCache, EventService, EventsSource, ManualClock, UpstreamFetchError,
    UpstreamQuery,
};

/// A typical upstream body with a single event.
pub fn single_event_body() -> Value {
    json!([{
        "id": "e1",
        "title": "Sumida River Fireworks",
        "description": "Annual fireworks festival",
        "startDate": "2025-07-26T19:00:00+09:00",
        "endDate": "2025-07-26T20:30:00+09:00",
        "location": "Sumida",
        "venue": "Sumida River",
        "organizer": "Sumida City",
        "category": "festival",
        "url": "https://events.example/e1",
        "ticketPrice": 0
    }])
}

/// Upstream body with two events, one of them sparse.
pub fn two_event_body() -> Value {
    json!([
        {"id": "e1", "title": "Sumida River Fireworks"},
        {"id": "e2", "title": "Sanja Matsuri", "extra": "ignored"}
    ])
}

/// Upstream stand-in that answers from a script and counts calls.
pub struct ScriptedSource {
    body: Mutex<Result<Value, String>>,
    calls: AtomicUsize,
    queries: Mutex<Vec<UpstreamQuery>>,
}

impl ScriptedSource {
    pub fn returning(body: Value) -> Arc<Self> {
        Arc::new(Self {
            body: Mutex::new(Ok(body)),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            body: Mutex::new(Err(message.to_string())),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Change what subsequent calls return.
    pub fn respond_with(&self, body: Value) {
        *self.body.lock().unwrap() = Ok(body);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<UpstreamQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EventsSource for ScriptedSource {
    async fn fetch_events(&self, query: &UpstreamQuery) -> Result<Value, UpstreamFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        self.body
            .lock()
            .unwrap()
            .clone()
            .map_err(UpstreamFetchError::Network)
    }
}

/// Upstream stand-in that parks every call until released.
#[derive(Default)]
pub struct GatedSource {
    entered: Notify,
    release: Notify,
}

impl GatedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Resolves once a call is parked inside the source.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked call answer with an empty array.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl EventsSource for GatedSource {
    async fn fetch_events(&self, _query: &UpstreamQuery) -> Result<Value, UpstreamFetchError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(json!([]))
    }
}

/// A manual clock pinned to 2025-03-01 09:00 UTC.
pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::starting_at(
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
    ))
}

/// Build a service over `source` with the given cache settings.
pub fn service_with(
    source: Arc<dyn EventsSource>,
    enabled: bool,
    ttl_secs: u64,
    clock: Arc<ManualClock>,
) -> EventService {
    let clock: Arc<dyn Clock> = clock;
    let cache = EventCache::new(
        CacheSettings {
            enabled,
            ttl: Duration::from_secs(ttl_secs),
        },
        Arc::clone(&clock),
    );
    EventService::new(source, cache, clock)
}
