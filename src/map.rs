//! Forgetting Map Implementation.
//!
//! A bounded map that, once full, makes room for a new key by forgetting the
//! entry it considers least worth keeping. Every read and write of a key is
//! recorded on that key's [`Tracker`], and the victim is the tracker ranked
//! most forgettable by [`selector::compare`]: fewest operations first, then
//! least recently touched, then oldest.
//!
//! Unlike an [LFU] cache with frequency buckets, the ranking here is
//! computed on demand with one pass over the live trackers. Reads and
//! updates stay O(1); only an insert into a full map pays O(n).
//!
//! [LFU]: https://en.wikipedia.org/wiki/Least_frequently_used

extern crate alloc;

#[cfg(not(feature = "hashbrown"))]
extern crate std;

use crate::config::ForgettingMapConfig;
use crate::error::ConfigError;
use crate::metrics::{CacheMetrics, ForgettingMapMetrics};
use crate::selector;
use crate::tracker::{Clock, Tracker};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A stored value together with the tracker for its key.
///
/// Keeping both in one slot means a key can never have a value without a
/// tracker or the other way round.
struct Slot<K, V> {
    value: V,
    tracker: Tracker<K>,
}

/// Internal segment holding the map's state and algorithm.
///
/// Shared between `ForgettingMap` (single-threaded) and
/// `ConcurrentForgettingMap` (one mutex around one segment). Every method
/// that reads or records usage takes `&mut self`, so whoever holds the
/// segment performs each compound operation without interleaving.
pub(crate) struct ForgettingSegment<K, V, S = DefaultHashBuilder> {
    config: ForgettingMapConfig,
    map: HashMap<K, Slot<K, V>, S>,
    clock: Clock,
    metrics: ForgettingMapMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> ForgettingSegment<K, V, S> {
    /// Creates an empty segment.
    pub(crate) fn init(config: ForgettingMapConfig, hash_builder: S) -> Self {
        let max_entries = config.max_entries.get();
        ForgettingSegment {
            config,
            map: HashMap::with_capacity_and_hasher(max_entries, hash_builder),
            clock: Clock::new(),
            metrics: ForgettingMapMetrics::new(max_entries as u64),
        }
    }

    #[inline]
    pub(crate) fn max_entries(&self) -> NonZeroUsize {
        self.config.max_entries
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &ForgettingMapMetrics {
        &self.metrics
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(key).map(|value| &*value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get_mut(key) {
            Some(slot) => {
                slot.tracker.record_operation(self.clock.tick());
                self.metrics.record_operation();
                self.metrics.core.record_hit();
                Some(&mut slot.value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|slot| &slot.value)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn tracker<Q>(&self, key: &Q) -> Option<&Tracker<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|slot| &slot.tracker)
    }

    /// Returns the tracker that would be forgotten by the next eviction.
    pub(crate) fn next_victim(&self) -> Option<&Tracker<K>> {
        selector::most_forgettable(self.map.values().map(|slot| &slot.tracker))
    }

    pub(crate) fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Clone,
    {
        if let Some(slot) = self.map.get_mut(&key) {
            slot.tracker.record_operation(self.clock.tick());
            self.metrics.record_operation();
            self.metrics.core.record_update();
            trace!(
                operation_count = slot.tracker.operation_count(),
                "updated existing entry"
            );
            return Some(mem::replace(&mut slot.value, value));
        }

        // The new key is not in the map yet, so it can never be the victim.
        if self.map.len() >= self.config.max_entries.get() {
            self.forget();
        }

        let mut tracker = Tracker::new(key.clone(), self.clock.tick());
        tracker.record_operation(self.clock.tick());
        self.map.insert(key, Slot { value, tracker });
        self.metrics.record_operation();
        self.metrics.core.record_insertion();
        trace!(len = self.map.len(), "inserted new entry");
        None
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.map.remove(key)?;
        self.metrics.core.record_removal();
        trace!(
            operation_count = slot.tracker.operation_count(),
            "removed entry"
        );
        Some(slot.value)
    }

    /// Removes the most forgettable entry and returns it.
    pub(crate) fn forget(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        let victim = self.next_victim()?.key().clone();
        let (key, slot) = self.map.remove_entry(&victim)?;
        self.metrics.record_victim(slot.tracker.operation_count());
        debug!(
            operation_count = slot.tracker.operation_count(),
            created_at = slot.tracker.created_at(),
            last_operation_at = ?slot.tracker.last_operation_at(),
            "forgot least used entry"
        );
        Some((key, slot.value))
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.metrics.core.record_clear();
    }
}

impl<K, V, S> core::fmt::Debug for ForgettingSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ForgettingSegment")
            .field("max_entries", &self.config.max_entries)
            .field("len", &self.map.len())
            .field("clock", &self.clock.now())
            .finish()
    }
}

/// A bounded map that forgets its least used entry when full.
///
/// Every [`get`](ForgettingMap::get) hit and every [`put`](ForgettingMap::put)
/// counts as one operation on the key. When a new key arrives and the map
/// already holds `max_entries` keys, the entry with the fewest operations is
/// forgotten; ties go to the entry touched longest ago, then to the oldest
/// entry. Updating an existing key keeps its history.
///
/// # Examples
///
/// ```
/// use forgetting_map::ForgettingMap;
/// use core::num::NonZeroUsize;
///
/// let mut map = ForgettingMap::new(NonZeroUsize::new(2).unwrap());
///
/// map.put("a", 1);
/// map.put("b", 2);
///
/// // "a" now has two operations, "b" only its insert
/// assert_eq!(map.get(&"a"), Some(&1));
///
/// // Inserting a third key forgets "b"
/// map.put("c", 3);
/// assert_eq!(map.get(&"b"), None);
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug)]
pub struct ForgettingMap<K, V, S = DefaultHashBuilder> {
    segment: ForgettingSegment<K, V, S>,
}

impl<K: Hash + Eq, V, S: BuildHasher> ForgettingMap<K, V, S> {
    /// Creates a map from a configuration and an optional hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// use forgetting_map::config::ForgettingMapConfig;
    /// use forgetting_map::ForgettingMap;
    ///
    /// let config = ForgettingMapConfig::try_new(10).unwrap();
    /// let map: ForgettingMap<&str, u32> = ForgettingMap::init(config, None);
    /// assert!(map.is_empty());
    /// ```
    pub fn init(config: ForgettingMapConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config.max_entries, hasher.unwrap_or_default())
    }

    /// Creates a map with the specified capacity and hash builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use forgetting_map::ForgettingMap;
    /// use core::num::NonZeroUsize;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let map: ForgettingMap<&str, u32, _> = ForgettingMap::with_hasher(
    ///     NonZeroUsize::new(10).unwrap(),
    ///     RandomState::new()
    /// );
    /// ```
    pub fn with_hasher(max_entries: NonZeroUsize, hash_builder: S) -> Self {
        Self {
            segment: ForgettingSegment::init(ForgettingMapConfig::new(max_entries), hash_builder),
        }
    }

    /// Returns the maximum number of keys the map can hold.
    #[inline]
    pub fn max_entries(&self) -> NonZeroUsize {
        self.segment.max_entries()
    }

    /// Returns the number of live keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Alias for [`len`](ForgettingMap::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the map holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns a reference to the value for `key`, recording an operation on it.
    ///
    /// A miss has no effect on any tracker.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value for `key`, recording an operation on it.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns the value for `key` without recording an operation.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns `true` if `key` is present. Does not record an operation.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains_key(key)
    }

    /// Returns a snapshot of the usage tracker for `key`.
    #[inline]
    pub fn tracker<Q>(&self, key: &Q) -> Option<Tracker<K>>
    where
        K: Borrow<Q> + Clone,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.tracker(key).cloned()
    }

    /// Inserts or updates `key`, returning the previous value.
    ///
    /// Inserting a new key into a full map first forgets the most
    /// forgettable entry. Updating an existing key never evicts and keeps
    /// the key's accumulated usage.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Clone,
    {
        self.segment.put(key, value)
    }

    /// Removes `key` and its tracker, returning the value if it was present.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Removes and returns the entry the next eviction would forget.
    ///
    /// # Examples
    ///
    /// ```
    /// use forgetting_map::ForgettingMap;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut map = ForgettingMap::new(NonZeroUsize::new(2).unwrap());
    /// map.put("a", 1);
    /// map.put("b", 2);
    /// map.get(&"b");
    ///
    /// assert_eq!(map.pop(), Some(("a", 1)));
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.segment.forget()
    }

    /// Removes every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }
}

impl<K: Hash + Eq, V> ForgettingMap<K, V> {
    /// Creates a map holding at most `max_entries` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use forgetting_map::ForgettingMap;
    /// use core::num::NonZeroUsize;
    ///
    /// let map: ForgettingMap<&str, u32> = ForgettingMap::new(NonZeroUsize::new(10).unwrap());
    /// ```
    pub fn new(max_entries: NonZeroUsize) -> ForgettingMap<K, V, DefaultHashBuilder> {
        ForgettingMap::with_hasher(max_entries, DefaultHashBuilder::default())
    }

    /// Creates a map from a plain integer capacity, rejecting zero.
    pub fn try_new(max_entries: usize) -> Result<Self, ConfigError> {
        let config = ForgettingMapConfig::try_new(max_entries)?;
        Ok(Self::new(config.max_entries))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for ForgettingMap<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
