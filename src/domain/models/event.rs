//! Normalized event record served to clients.

use serde::{Deserialize, Serialize};

/// A single event in the fixed output shape.
///
/// Fields missing upstream stay `None` and are omitted from the JSON body.
/// Dates are passed through as the upstream supplied them; nothing here is
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO-8601 date-time as supplied upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// ISO-8601 date-time as supplied upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Event {
    /// JSON keys of the output shape, in serialization order.
    pub const FIELDS: [&'static str; 10] = [
        "id",
        "title",
        "description",
        "startDate",
        "endDate",
        "location",
        "venue",
        "organizer",
        "category",
        "url",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let event = Event {
            id: Some("e1".to_string()),
            start_date: Some("2025-04-01T10:00:00+09:00".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "e1", "startDate": "2025-04-01T10:00:00+09:00"})
        );
    }
}
