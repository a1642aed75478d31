//! Reshapes raw upstream records into [`Event`]s.
//!
//! Unknown fields are dropped, missing ones stay absent. A body that is not
//! a JSON array yields zero events rather than an error.

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::models::Event;

/// Map an upstream response body to events, preserving order and length.
pub fn normalize(raw: &Value) -> Vec<Event> {
    let Some(records) = raw.as_array() else {
        warn!(
            payload_type = json_type_name(raw),
            "upstream payload is not an array, returning no events"
        );
        return Vec::new();
    };

    records.iter().map(normalize_record).collect()
}

/// Extract the known fields of a single record.
///
/// A record that is not an object produces an event with every field absent.
pub fn normalize_record(record: &Value) -> Event {
    let Some(fields) = record.as_object() else {
        return Event::default();
    };

    Event {
        id: text_field(fields, "id"),
        title: text_field(fields, "title"),
        description: text_field(fields, "description"),
        start_date: text_field(fields, "startDate"),
        end_date: text_field(fields, "endDate"),
        location: text_field(fields, "location"),
        venue: text_field(fields, "venue"),
        organizer: text_field(fields, "organizer"),
        category: text_field(fields, "category"),
        url: text_field(fields, "url"),
    }
}

/// Strings pass through; numbers and booleans are rendered as text; null,
/// arrays and objects count as absent.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
