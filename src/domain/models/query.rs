//! Retrieval options and the resolved upstream query.

use chrono::{DateTime, NaiveDate, Utc};

/// Result limit used when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 30;

/// The only location the gateway asks upstream about.
pub const DEFAULT_LOCATION: &str = "Tokyo";

/// Per-request retrieval options. Everything is optional; the orchestrator
/// fills in defaults on a cache miss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    #[must_use]
    pub const fn end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Fully resolved parameters of one upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub limit: u32,
}

impl UpstreamQuery {
    /// Query-string pairs in the order upstream documents them.
    ///
    /// Dates are rendered as `YYYY-MM-DD`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("location", self.location.clone()),
            ("startDate", self.start_date.format("%Y-%m-%d").to_string()),
            ("endDate", self.end_date.format("%Y-%m-%d").to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_format_dates_without_time() {
        let query = UpstreamQuery {
            location: DEFAULT_LOCATION.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            limit: 10,
        };

        assert_eq!(
            query.params(),
            vec![
                ("location", "Tokyo".to_string()),
                ("startDate", "2025-03-05".to_string()),
                ("endDate", "2025-04-05".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_options_builder() {
        let options = QueryOptions::new().limit(5);
        assert_eq!(options.limit, Some(5));
        assert!(options.start_date.is_none());
        assert!(options.end_date.is_none());
    }
}
