//! Single-slot TTL cache for the last fetched batch of events.
//!
//! The slot is not keyed by query: a hit returns whatever batch was stored
//! last, whatever date range or limit produced it. Reads and writes go
//! through one mutex so validity is checked and data read atomically.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::domain::errors::CacheClearError;
use crate::domain::models::Event;
use crate::domain::ports::Clock;

/// Cache settings resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// When false the slot is never read or written (clear still works)
    pub enabled: bool,
    /// Maximum age of a fresh entry
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// The cached batch and when it was captured.
#[derive(Debug, Clone)]
struct CacheEntry {
    events: Arc<[Event]>,
    captured_at: Instant,
}

/// Process-wide holder of the most recent result set.
pub struct EventCache {
    settings: CacheSettings,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<CacheEntry>>,
}

impl EventCache {
    pub fn new(settings: CacheSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clock,
            slot: Mutex::new(None),
        }
    }

    pub const fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// True iff caching is enabled, data is present and younger than the TTL.
    pub fn is_valid(&self) -> bool {
        self.get_valid().is_some()
    }

    /// Cached events, if the slot is currently valid.
    pub fn get_valid(&self) -> Option<Arc<[Event]>> {
        if !self.settings.enabled {
            return None;
        }

        let slot = match self.slot() {
            Ok(slot) => slot,
            Err(e) => {
                warn!(error = %e, "cache slot unreadable, treating as miss");
                return None;
            }
        };

        let entry = slot.as_ref()?;
        let age = self.clock.instant().saturating_duration_since(entry.captured_at);
        (age < self.settings.ttl).then(|| Arc::clone(&entry.events))
    }

    /// Overwrite the slot with `events`, stamped with the current instant.
    ///
    /// Does nothing when caching is disabled.
    pub fn put(&self, events: Arc<[Event]>) {
        if !self.settings.enabled {
            debug!("caching disabled, not storing events");
            return;
        }

        let count = events.len();
        let entry = CacheEntry {
            events,
            captured_at: self.clock.instant(),
        };

        match self.slot() {
            Ok(mut slot) => {
                *slot = Some(entry);
                debug!(count, "events cached");
            }
            Err(e) => warn!(error = %e, "cache slot unwritable, events not cached"),
        }
    }

    /// Reset the slot to empty, regardless of enablement.
    pub fn clear(&self) -> Result<(), CacheClearError> {
        let mut slot = self.slot()?;
        *slot = None;
        debug!("cache cleared");
        Ok(())
    }

    fn slot(&self) -> Result<MutexGuard<'_, Option<CacheEntry>>, CacheClearError> {
        self.slot
            .lock()
            .map_err(|e: PoisonError<_>| CacheClearError::Corrupted(e.to_string()))
    }
}
