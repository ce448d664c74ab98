//! Forgetting Map Metrics
//!
//! Extends [`CoreCacheMetrics`] with tracker activity and statistics about
//! the victims chosen so far.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics kept by a forgetting map.
#[derive(Debug, Clone)]
pub struct ForgettingMapMetrics {
    /// Core metrics common to all maps
    pub core: CoreCacheMetrics,

    /// Total operations recorded on trackers (every hit and every put)
    pub operations_recorded: u64,

    /// Operation count of the most recent victim, if any key was evicted
    pub last_victim_operation_count: Option<u64>,

    /// Highest operation count any victim had when it was evicted
    pub max_victim_operation_count: u64,
}

impl ForgettingMapMetrics {
    /// Creates empty metrics for a map holding at most `max_entries`.
    pub fn new(max_entries: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_entries),
            operations_recorded: 0,
            last_victim_operation_count: None,
            max_victim_operation_count: 0,
        }
    }

    /// Records one tracker operation.
    #[inline]
    pub fn record_operation(&mut self) {
        self.operations_recorded += 1;
    }

    /// Records an eviction of a key that had `operation_count` operations.
    pub fn record_victim(&mut self, operation_count: u64) {
        self.core.record_eviction();
        self.last_victim_operation_count = Some(operation_count);
        if operation_count > self.max_victim_operation_count {
            self.max_victim_operation_count = operation_count;
        }
    }

    /// Average number of operations per inserted key.
    pub fn average_operations_per_key(&self) -> f64 {
        if self.core.insertions > 0 {
            self.operations_recorded as f64 / self.core.insertions as f64
        } else {
            0.0
        }
    }

    /// Converts all metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert(
            "operations_recorded".to_string(),
            self.operations_recorded as f64,
        );
        metrics.insert(
            "average_operations_per_key".to_string(),
            self.average_operations_per_key(),
        );
        metrics.insert(
            "max_victim_operation_count".to_string(),
            self.max_victim_operation_count as f64,
        );
        if let Some(count) = self.last_victim_operation_count {
            metrics.insert("last_victim_operation_count".to_string(), count as f64);
        }

        metrics
    }
}

impl CacheMetrics for ForgettingMapMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ForgettingMap"
    }
}
