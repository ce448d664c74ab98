//! Per-Key Usage Tracking
//!
//! Every live key in a forgetting map owns exactly one [`Tracker`]. The
//! tracker records when the key was first inserted, when it was last
//! touched, and how many times it has been touched. The eviction ranking in
//! [`selector`](crate::selector) reads nothing else.
//!
//! # Timestamps
//!
//! Timestamps are ticks of a [`Clock`] owned by the map, not wall-clock
//! readings. Each call to [`Clock::tick`] returns a value strictly greater
//! than every earlier one (until the clock saturates at `u64::MAX`, far
//! beyond any realistic number of operations), so within one map:
//!
//! - no two trackers share a `created_at`
//! - "older" always means "happened earlier in this map's history"
//!
//! A wall clock with second (or even nanosecond) resolution would let two
//! back-to-back operations collide and push the ranking into its tie-breaks.
//!
//! # Memory Layout
//!
//! | Field | Size |
//! |-------|------|
//! | `key` | `size_of::<K>()` |
//! | `created_at` | 8 bytes |
//! | `last_operation_at` | 16 bytes |
//! | `operation_count` | 8 bytes |
//!
//! # Examples
//!
//! ```
//! use forgetting_map::tracker::{Clock, Tracker};
//!
//! let mut clock = Clock::new();
//! let mut tracker = Tracker::new("key", clock.tick());
//! assert_eq!(tracker.operation_count(), 0);
//! assert_eq!(tracker.last_operation_at(), None);
//!
//! tracker.record_operation(clock.tick());
//! assert_eq!(tracker.operation_count(), 1);
//! assert!(tracker.last_operation_at() > Some(tracker.created_at()));
//! ```

use core::fmt;

/// A point in a map's logical history.
pub type Timestamp = u64;

/// Strictly increasing logical clock.
///
/// The first tick is `1`; `0` is never handed out. The clock saturates at
/// `u64::MAX` instead of wrapping, so a tick never sorts before an earlier one.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    now: Timestamp,
}

impl Clock {
    /// Creates a clock that has not ticked yet.
    #[inline]
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Advances the clock and returns the new time.
    #[inline]
    pub fn tick(&mut self) -> Timestamp {
        self.now = self.now.saturating_add(1);
        self.now
    }

    /// Returns the most recently issued time, or `0` if the clock never ticked.
    #[inline]
    pub fn now(&self) -> Timestamp {
        self.now
    }
}

/// Usage metadata for one key.
///
/// The key is fixed at creation; everything else changes only through
/// [`record_operation`](Tracker::record_operation).
#[derive(Clone, PartialEq, Eq)]
pub struct Tracker<K> {
    key: K,
    created_at: Timestamp,
    last_operation_at: Option<Timestamp>,
    operation_count: u64,
}

impl<K> Tracker<K> {
    /// Creates a tracker for `key` with no recorded operations.
    #[inline]
    pub fn new(key: K, now: Timestamp) -> Self {
        Self {
            key,
            created_at: now,
            last_operation_at: None,
            operation_count: 0,
        }
    }

    /// Records one operation (a read or a write) at `now`.
    #[inline]
    pub fn record_operation(&mut self, now: Timestamp) {
        self.last_operation_at = Some(now);
        self.operation_count = self.operation_count.saturating_add(1);
    }

    /// The tracked key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// When the tracker was created.
    #[inline]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the last operation was recorded, if any.
    #[inline]
    pub fn last_operation_at(&self) -> Option<Timestamp> {
        self.last_operation_at
    }

    /// Number of recorded operations.
    #[inline]
    pub fn operation_count(&self) -> u64 {
        self.operation_count
    }
}

impl<K: fmt::Debug> fmt::Debug for Tracker<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("key", &self.key)
            .field("created_at", &self.created_at)
            .field("last_operation_at", &self.last_operation_at)
            .field("operation_count", &self.operation_count)
            .finish()
    }
}
