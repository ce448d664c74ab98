//! Forgetting Map Metrics Demonstration
//!
//! Runs a small workload against a single-threaded map and prints the
//! metrics it reports: core hit/miss/eviction counters plus the
//! tracker-level figures specific to the forgetting policy.
//!
//! Run with: cargo run --example metrics_demo

use forgetting_map::config::ForgettingMapConfig;
use forgetting_map::metrics::CacheMetrics;
use forgetting_map::ForgettingMap;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

fn main() {
    println!("Forgetting Map Metrics");
    println!("======================\n");

    // Small capacity so the workload triggers evictions
    let config = ForgettingMapConfig::new(NonZeroUsize::new(3).unwrap());
    println!("max_entries: {}", config.max_entries);
    println!("workload:    insert 3 keys, read two of them, insert 2 more\n");

    let mut map = ForgettingMap::init(config, None);
    run_workload(&mut map);

    display_metrics(map.algorithm_name(), &map.metrics());
    demonstrate_deterministic_ordering(&map);
}

fn run_workload(map: &mut ForgettingMap<&'static str, i32>) {
    map.put("apple", 1);
    map.put("banana", 2);
    map.put("cherry", 3);

    // apple ends with three operations, banana with two, cherry with one
    map.get(&"apple");
    map.get(&"apple");
    map.get(&"banana");

    // Misses are counted but touch no tracker
    map.get(&"fig");
    map.get(&"grape");

    // cherry is forgotten first, then date (one operation, newest)
    map.put("date", 4);
    map.put("elderberry", 5);

    for key in ["apple", "banana", "cherry", "date", "elderberry"] {
        match map.tracker(&key) {
            Some(tracker) => println!(
                "  {:<11} ops={} last_op={:?} created={}",
                key,
                tracker.operation_count(),
                tracker.last_operation_at(),
                tracker.created_at()
            ),
            None => println!("  {:<11} forgotten", key),
        }
    }
    println!();
}

fn display_metrics(name: &str, metrics: &BTreeMap<String, f64>) {
    println!("{} metrics", name);
    println!("{}", "-".repeat(44));
    for (key, value) in metrics {
        if key.ends_with("_rate") || key == "utilization" {
            println!("  {:<30} {:>10.2}%", key, value * 100.0);
        } else {
            println!("  {:<30} {:>10.2}", key, value);
        }
    }
    println!();
}

/// BTreeMap output keeps metric order stable between runs.
fn demonstrate_deterministic_ordering(map: &dyn CacheMetrics) {
    let first: Vec<String> = map.metrics().into_keys().collect();
    let second: Vec<String> = map.metrics().into_keys().collect();
    assert_eq!(first, second);
    println!("metric keys are reported in the same order on every call");
}
