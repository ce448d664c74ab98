//! Concurrent Forgetting Map
//!
//! Provides [`ConcurrentForgettingMap`], a thread-safe forgetting map for
//! sharing one bounded store between threads.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            ConcurrentForgettingMap           │
//! │                                              │
//! │   ┌──────────────────────────────────────┐   │
//! │   │          Mutex (parking_lot)         │   │
//! │   └──────────────────┬───────────────────┘   │
//! │                      │                       │
//! │   ┌──────────────────▼───────────────────┐   │
//! │   │          ForgettingSegment           │   │
//! │   │   key ──▶ (value, tracker)  + clock  │   │
//! │   └──────────────────────────────────────┘   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one lock. Every public method takes it once, runs the
//! whole operation (capacity check, victim search, eviction, insert, usage
//! record), and releases it. No method takes it twice.
//!
//! ## Why not lock striping?
//!
//! Striped caches evict per segment, so the victim is only the least used
//! entry *of one segment*, and the total entry count is only bounded by the
//! sum of segment capacities. A forgetting map promises the globally most
//! forgettable victim and an exact `max_entries` bound, which needs one view
//! of every tracker at eviction time.
//!
//! # Example
//!
//! ```rust
//! use forgetting_map::ConcurrentForgettingMap;
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let map: Arc<ConcurrentForgettingMap<String, i32>> =
//!     Arc::new(ConcurrentForgettingMap::new(NonZeroUsize::new(100).unwrap()));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let map = Arc::clone(&map);
//!     thread::spawn(move || {
//!         for i in 0..1000 {
//!             let key = format!("key_{}_{}", t, i % 50);
//!             map.put(key.clone(), i);
//!             let _ = map.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert!(map.len() <= 100);
//! ```
//!
//! # Zero-Copy Access
//!
//! `get()` clones the value so the lock is released before returning. Use
//! `get_with()` to work on the value while the lock is held:
//!
//! ```rust,ignore
//! let len = map.get_with(&key, |value: &String| value.len());
//! ```

mod map;

pub use self::map::ConcurrentForgettingMap;
