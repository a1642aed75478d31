//! Retrieval behaviour across the cache, the normalizer and the upstream port.

mod common;

use serde_json::json;
use std::time::Duration;

use common::{manual_clock, service_with, single_event_body, two_event_body, ScriptedSource};
use tokyo_events::{QueryOptions, UpstreamFetchError};

#[tokio::test]
async fn test_cache_disabled_calls_upstream_every_time() {
    let source = ScriptedSource::returning(single_event_body());
    let service = service_with(source.clone(), false, 3600, manual_clock());

    let first = service.get_events(QueryOptions::new()).await.unwrap();
    let second = service.get_events(QueryOptions::new()).await.unwrap();

    assert_eq!(source.calls(), 2);
    assert_eq!(first, second);
    assert!(!service.cache().is_valid());
}

#[tokio::test]
async fn test_cache_enabled_serves_second_call_from_slot() {
    let source = ScriptedSource::returning(single_event_body());
    let service = service_with(source.clone(), true, 3600, manual_clock());

    let first = service.get_events(QueryOptions::new()).await.unwrap();
    // Different options still hit the single slot
    let second = service
        .get_events(QueryOptions::new().limit(5))
        .await
        .unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(second[0].id.as_deref(), Some("e1"));
}

#[tokio::test]
async fn test_clear_forces_refetch() {
    let source = ScriptedSource::returning(single_event_body());
    let service = service_with(source.clone(), true, 3600, manual_clock());

    service.get_events(QueryOptions::new()).await.unwrap();
    service.clear_cache().unwrap();
    source.respond_with(two_event_body());
    let refreshed = service.get_events(QueryOptions::new()).await.unwrap();

    assert_eq!(source.calls(), 2);
    assert_eq!(refreshed.len(), 2);
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let clock = manual_clock();
    let source = ScriptedSource::returning(single_event_body());
    let service = service_with(source.clone(), true, 60, clock.clone());

    service.get_events(QueryOptions::new()).await.unwrap();

    clock.advance(Duration::from_secs(59));
    service.get_events(QueryOptions::new()).await.unwrap();
    assert_eq!(source.calls(), 1, "still fresh one second before expiry");

    clock.advance(Duration::from_secs(1));
    service.get_events(QueryOptions::new()).await.unwrap();
    assert_eq!(source.calls(), 2, "stale exactly at the TTL");
}

#[tokio::test]
async fn test_upstream_failure_wraps_cause() {
    let source = ScriptedSource::failing("boom");
    let service = service_with(source.clone(), true, 3600, manual_clock());

    let err = service.get_events(QueryOptions::new()).await.unwrap_err();

    assert!(matches!(err.upstream(), UpstreamFetchError::Network(msg) if msg == "boom"));
    assert!(err.to_string().starts_with("Failed to retrieve events"));
    assert!(err.to_string().contains("boom"));
    assert!(!service.cache().is_valid(), "failures are never cached");
}

#[tokio::test]
async fn test_non_array_body_yields_empty_batch() {
    let source = ScriptedSource::returning(json!({"events": []}));
    let service = service_with(source.clone(), true, 3600, manual_clock());

    let events = service.get_events(QueryOptions::new()).await.unwrap();
    assert!(events.is_empty());

    // An empty batch is still valid cached data
    service.get_events(QueryOptions::new()).await.unwrap();
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_sparse_records_keep_order_and_absent_fields() {
    let source = ScriptedSource::returning(two_event_body());
    let service = service_with(source, false, 3600, manual_clock());

    let events = service.get_events(QueryOptions::new()).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id.as_deref(), Some("e1"));
    assert_eq!(events[1].id.as_deref(), Some("e2"));
    assert!(events[1].description.is_none());
}

#[tokio::test]
async fn test_default_query_sent_upstream() {
    let source = ScriptedSource::returning(json!([]));
    let service = service_with(source.clone(), false, 3600, manual_clock());

    service.get_events(QueryOptions::new()).await.unwrap();

    let query = source.last_query().unwrap();
    assert_eq!(
        query.params(),
        vec![
            ("location", "Tokyo".to_string()),
            ("startDate", "2025-03-01".to_string()),
            ("endDate", "2025-04-01".to_string()),
            ("limit", "30".to_string()),
        ]
    );
}
