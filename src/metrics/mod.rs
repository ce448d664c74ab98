//! Map Metrics System
//!
//! Provides BTreeMap-based metrics reporting for the forgetting maps. Both
//! the single-threaded and the concurrent map implement the common
//! [`CacheMetrics`] trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Two runs of the same workload print identically
//!
//! The performance difference is negligible with ~15 metric keys.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod forgetting;

pub use forgetting::ForgettingMapMetrics;

/// Counters common to every bounded map.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`) made against the map
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of `put` calls that added a new key
    pub insertions: u64,

    /// Number of `put` calls that replaced the value of an existing key
    pub updates: u64,

    /// Number of keys removed explicitly through `remove`
    pub removals: u64,

    /// Number of keys forgotten to make room for a new one
    pub evictions: u64,

    /// Number of live keys
    pub entries: u64,

    /// Maximum number of live keys
    pub max_entries: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters for a map holding at most `max_entries`.
    pub fn new(max_entries: u64) -> Self {
        Self {
            max_entries,
            ..Default::default()
        }
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key being added.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.entries += 1;
    }

    /// Records the value of an existing key being replaced.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records a key being forgotten to make room.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records every key being dropped at once.
    pub fn record_clear(&mut self) {
        self.entries = 0;
    }

    /// Fraction of lookups that hit, or 0.0 if there were none.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 if there were none.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// How full the map is, between 0.0 and 1.0.
    pub fn utilization(&self) -> f64 {
        if self.max_entries > 0 {
            self.entries as f64 / self.max_entries as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);

        metrics.insert("entries".to_string(), self.entries as f64);
        metrics.insert("max_entries".to_string(), self.max_entries as f64);
        metrics.insert("utilization".to_string(), self.utilization());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics interface shared by every map in this crate.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Name identifying the map implementation.
    fn algorithm_name(&self) -> &'static str;
}
