//! Time source used for cache timestamps, default date ranges and health
//! reports.

use chrono::{DateTime, Utc};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Port trait for reading the current time.
pub trait Clock: Send + Sync {
    /// Monotonic instant; used for TTL arithmetic.
    fn instant(&self) -> Instant;

    /// Wall-clock time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Both readings advance together, so TTL expiry and default date ranges can
/// be tested without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    base_instant: Instant,
    base_utc: DateTime<Utc>,
    offset: Mutex<Duration>,
}

impl ManualClock {
    /// Start the clock at the given wall-clock time.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            base_instant: Instant::now(),
            base_utc: now,
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += by;
    }

    fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(Utc::now())
    }
}

impl Clock for ManualClock {
    fn instant(&self) -> Instant {
        self.base_instant + self.offset()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.offset())
            .ok()
            .and_then(|delta| self.base_utc.checked_add_signed(delta))
            .unwrap_or(self.base_utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances_both_readings() {
        let start = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        let clock = ManualClock::starting_at(start);
        let first = clock.instant();

        clock.advance(Duration::from_secs(90));

        assert_eq!(clock.instant() - first, Duration::from_secs(90));
        assert_eq!(
            clock.now_utc(),
            Utc.with_ymd_and_hms(2025, 1, 31, 12, 1, 30).unwrap()
        );
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.instant();
        let b = clock.instant();
        assert!(b >= a);
    }
}
