#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How a Victim Is Chosen
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │          put(new key) while len == max_entries                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  for every live tracker, keep the most forgettable so far:      │
//! │                                                                 │
//! │   ┌──────────────────┐  fewer ops?   ┌──────────────────┐       │
//! │   │ operation_count  │──────────────▶│ more forgettable │       │
//! │   └────────┬─────────┘               └──────────────────┘       │
//! │         tie│                                  ▲                 │
//! │   ┌────────▼─────────┐  never / older?        │                 │
//! │   │ last_operation_at│────────────────────────┤                 │
//! │   └────────┬─────────┘                        │                 │
//! │         tie│                                  │                 │
//! │   ┌────────▼─────────┐  older?                │                 │
//! │   │    created_at    │────────────────────────┘                 │
//! │   └──────────────────┘                                          │
//! │                                                                 │
//! │  remove the winner's value and tracker, then insert             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Type | Description | Use Case |
//! |------|-------------|----------|
//! | [`ForgettingMap`] | Single-threaded, `&mut self` | Owned by one task or behind your own lock |
//! | [`ConcurrentForgettingMap`] | One internal lock, `&self` | Shared via `Arc` between threads |
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `get` / `peek` / `remove` | O(1) |
//! | `put` of existing key | O(1) |
//! | `put` of new key, not full | O(1) |
//! | `put` of new key, full | O(n) victim scan, no allocation |
//!
//! ## Code Examples
//!
//! ```rust
//! use forgetting_map::ForgettingMap;
//! use core::num::NonZeroUsize;
//!
//! let mut map = ForgettingMap::new(NonZeroUsize::new(3).unwrap());
//! map.put("K1", "V1");
//! map.put("K2", "V2");
//! map.put("K3", "V3");
//!
//! map.put("K1", "V1");
//! map.get(&"K3");
//!
//! // K2 has only its insert and is forgotten
//! map.put("K4", "V4");
//! assert_eq!(map.get(&"K2"), None);
//! assert_eq!(map.len(), 3);
//! ```
//!
//! Capacities from user input go through the fallible constructor:
//!
//! ```rust
//! use forgetting_map::ForgettingMap;
//!
//! assert!(ForgettingMap::<String, u32>::try_new(0).is_err());
//! ```

#![no_std]

/// Configuration for forgetting maps.
pub mod config;

/// Error types.
pub mod error;

/// Per-key usage trackers and the logical clock that timestamps them.
pub mod tracker;

/// Forgettability ranking and victim search.
///
/// Defines the order in which trackers become eviction victims and the
/// single-pass search for the most forgettable one.
pub mod selector;

/// Single-threaded forgetting map.
pub mod map;

/// Map metrics system.
///
/// Provides counters for hits, misses, insertions, evictions and tracker
/// activity, reported through the common [`metrics::CacheMetrics`] trait.
pub mod metrics;

/// Thread-safe forgetting map.
///
/// Wraps the map state in a single lock so that every compound operation
/// (capacity check, eviction, insert) is atomic with respect to other
/// threads.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use config::ForgettingMapConfig;
pub use error::ConfigError;
pub use map::ForgettingMap;
pub use tracker::{Timestamp, Tracker};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentForgettingMap;
