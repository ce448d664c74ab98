//! Stress Tests for the Concurrent Forgetting Map
//!
//! These tests verify thread safety and correctness under high contention.

#![cfg(feature = "concurrent")]

use forgetting_map::metrics::CacheMetrics;
use forgetting_map::ConcurrentForgettingMap;
use scoped_threadpool::Pool;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const NUM_THREADS: usize = 16;
const OPS_PER_THREAD: usize = 10_000;

fn make_map<K, V>(cap: usize) -> ConcurrentForgettingMap<K, V>
where
    K: std::hash::Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    ConcurrentForgettingMap::new(NonZeroUsize::new(cap).unwrap())
}

// ============================================================================
// THREAD POOL
// ============================================================================

#[test]
fn test_thread_pool_two_keys_capacity_one() {
    // Two keys fighting over one slot from a pool of workers
    let map: ConcurrentForgettingMap<&str, &str> = make_map(1);
    let mut pool = Pool::new(5);

    pool.scoped(|scope| {
        for i in 0..=5_000 {
            let map = &map;
            scope.execute(move || {
                if i % 2 == 0 {
                    map.put("KEY_1", "VALUE_1");
                } else {
                    map.put("KEY_2", "VALUE_2");
                }
                assert!(map.len() <= 1);
            });
        }
    });

    assert_eq!(map.size(), 1);
    let has_1 = map.contains_key(&"KEY_1");
    let has_2 = map.contains_key(&"KEY_2");
    assert!(has_1 ^ has_2, "exactly one key survives");
}

#[test]
fn test_thread_pool_shared_borrow() {
    let map: ConcurrentForgettingMap<usize, usize> = make_map(64);
    let mut pool = Pool::new(8);

    pool.scoped(|scope| {
        for worker in 0..8 {
            let map = &map;
            scope.execute(move || {
                for i in 0..1_000 {
                    let key = (worker * 31 + i) % 128;
                    map.put(key, i);
                    let _ = map.get(&key);
                }
            });
        }
    });

    assert_eq!(map.len(), 64);
    for key in 0..128 {
        if let Some(tracker) = map.tracker(&key) {
            assert!(tracker.operation_count() >= 1);
            assert!(tracker.last_operation_at().is_some());
        }
    }
}

// ============================================================================
// HIGH CONTENTION
// ============================================================================

#[test]
fn stress_mixed_operations() {
    let map: Arc<ConcurrentForgettingMap<String, usize>> = Arc::new(make_map(1000));
    let errors = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            let errors = Arc::clone(&errors);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = format!("key_{}", (t * OPS_PER_THREAD + i) % 2000);
                    match i % 5 {
                        0..=1 => {
                            map.put(key, i);
                        }
                        2..=3 => {
                            let _ = map.get(&key);
                        }
                        _ => {
                            let _ = map.remove(&key);
                        }
                    }
                    if map.len() > 1000 {
                        errors.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(errors.load(Ordering::Relaxed), 0);
    assert!(map.len() <= 1000);
}

#[test]
fn stress_single_hot_key() {
    let map: Arc<ConcurrentForgettingMap<usize, usize>> = Arc::new(make_map(10));
    map.put(0, 0);

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    if i % 2 == 0 {
                        let _ = map.get(&0);
                    } else {
                        // Churn the other slots with unique keys
                        map.put(1 + t * OPS_PER_THREAD + i, i);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // The hot key outranks every churned key and is never forgotten
    assert!(map.contains_key(&0));
    let tracker = map.tracker(&0).unwrap();
    assert_eq!(
        tracker.operation_count(),
        1 + (NUM_THREADS * OPS_PER_THREAD / 2) as u64
    );
    assert_eq!(map.len(), 10);
}

#[test]
fn stress_clear_during_operations() {
    let map: Arc<ConcurrentForgettingMap<usize, usize>> = Arc::new(make_map(100));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD / 10 {
                    if t == 0 && i % 100 == 0 {
                        map.clear();
                    } else {
                        map.put(t * 1_000 + i % 200, i);
                        let _ = map.peek(&(t * 1_000));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(map.len() <= 100);
    let metrics = map.metrics();
    assert_eq!(metrics["entries"], map.len() as f64);
}

#[test]
fn stress_pop_drains_in_rank_order() {
    let map: Arc<ConcurrentForgettingMap<usize, usize>> = Arc::new(make_map(256));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for key in (t * 64)..((t + 1) * 64) {
                    map.put(key, key);
                    for _ in 0..(key % 5) {
                        let _ = map.get(&key);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(map.len(), 256);

    // Popped keys never have more operations than the ones popped after them
    let mut last_count = 0;
    while let Some((key, value)) = map.pop() {
        assert_eq!(key, value);
        let count = 1 + (key % 5) as u64;
        assert!(count >= last_count);
        last_count = count;
    }
    assert!(map.is_empty());
}
