//! Concurrent Forgetting Map Usage Examples
//!
//! This example demonstrates multi-threaded usage patterns for the
//! concurrent forgetting map.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

use forgetting_map::metrics::CacheMetrics;
use forgetting_map::ConcurrentForgettingMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() {
    println!("Concurrent Forgetting Map Examples");
    println!("==================================\n");

    basic_sharing();
    hot_keys_survive_churn();
    zero_copy_reads();
}

/// Several threads writing and reading one shared map.
fn basic_sharing() {
    println!("1. Basic sharing");

    let map: Arc<ConcurrentForgettingMap<String, usize>> =
        Arc::new(ConcurrentForgettingMap::new(NonZeroUsize::new(1000).unwrap()));
    let num_threads = 8;
    let ops_per_thread = 10_000;

    let start = Instant::now();
    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("key_{}_{}", t, i % 500);
                    map.put(key.clone(), i);
                    let _ = map.get(&key);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let elapsed = start.elapsed();

    let total = num_threads * ops_per_thread * 2;
    println!("   {} operations in {:?}", total, elapsed);
    println!(
        "   {:.0} ops/sec, {} live keys (max {})\n",
        total as f64 / elapsed.as_secs_f64(),
        map.len(),
        map.max_entries()
    );
}

/// Frequently used keys outrank a stream of one-off keys.
fn hot_keys_survive_churn() {
    println!("2. Hot keys survive churn");

    let map: Arc<ConcurrentForgettingMap<u64, u64>> =
        Arc::new(ConcurrentForgettingMap::new(NonZeroUsize::new(16).unwrap()));
    for hot in 0..4 {
        map.put(hot, hot);
    }

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..5_000u64 {
                    let _ = map.get(&(i % 4));
                }
            })
        })
        .collect();
    let writer = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for i in 0..5_000u64 {
                map.put(1_000 + i, i);
            }
        })
    };
    for handle in readers {
        handle.join().unwrap();
    }
    writer.join().unwrap();

    for hot in 0..4 {
        let ops = map.tracker(&hot).map(|t| t.operation_count());
        println!("   hot key {} -> operations {:?}", hot, ops);
    }
    let metrics = map.metrics();
    println!(
        "   evictions: {}, highest victim operation count: {}\n",
        metrics["evictions"], metrics["max_victim_operation_count"]
    );
}

/// Reading through `get_with` avoids cloning the stored value.
fn zero_copy_reads() {
    println!("3. Zero-copy reads");

    let map: ConcurrentForgettingMap<&str, Vec<u8>> =
        ConcurrentForgettingMap::new(NonZeroUsize::new(4).unwrap());
    map.put("blob", vec![0u8; 4096]);

    let len = map.get_with(&"blob", |bytes| bytes.len());
    println!("   blob length without cloning: {:?}", len);
}
