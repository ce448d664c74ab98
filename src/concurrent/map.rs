extern crate alloc;

use crate::config::ForgettingMapConfig;
use crate::error::ConfigError;
use crate::map::{DefaultHashBuilder, ForgettingSegment};
use crate::metrics::CacheMetrics;
use crate::tracker::Tracker;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

/// A thread-safe forgetting map guarded by a single lock.
pub struct ConcurrentForgettingMap<K, V, S = DefaultHashBuilder> {
    segment: Mutex<ForgettingSegment<K, V, S>>,
}

impl<K, V> ConcurrentForgettingMap<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a concurrent map holding at most `max_entries` keys.
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self::with_hasher(max_entries, DefaultHashBuilder::default())
    }

    /// Creates a concurrent map from a plain integer capacity, rejecting zero.
    pub fn try_new(max_entries: usize) -> Result<Self, ConfigError> {
        let config = ForgettingMapConfig::try_new(max_entries)?;
        Ok(Self::new(config.max_entries))
    }
}

impl<K, V, S> ConcurrentForgettingMap<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Send,
{
    /// Creates a concurrent map from a configuration and an optional hasher.
    pub fn init(config: ForgettingMapConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config.max_entries, hasher.unwrap_or_default())
    }

    /// Creates a concurrent map with a custom hasher.
    pub fn with_hasher(max_entries: NonZeroUsize, hash_builder: S) -> Self {
        Self {
            segment: Mutex::new(ForgettingSegment::init(
                ForgettingMapConfig::new(max_entries),
                hash_builder,
            )),
        }
    }

    /// Returns the maximum number of keys the map can hold.
    pub fn max_entries(&self) -> NonZeroUsize {
        self.segment.lock().max_entries()
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Alias for [`len`](ConcurrentForgettingMap::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Gets a value, recording an operation on its key.
    ///
    /// This clones the value to avoid holding the lock. For zero-copy access,
    /// use `get_with()` instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().get(key).cloned()
    }

    /// Gets a value and applies a function to it while holding the lock.
    ///
    /// Records an operation on the key exactly like `get()`.
    ///
    /// The closure runs while the map's lock is held, so it must not call
    /// back into the same map: every method except `Debug` formatting would
    /// block forever.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment.lock().get(key).map(f)
    }

    /// Gets a value without recording an operation.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().peek(key).cloned()
    }

    /// Returns `true` if the map contains `key`. Does not record an operation.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().contains_key(key)
    }

    /// Returns a snapshot of the usage tracker for `key`.
    pub fn tracker<Q>(&self, key: &Q) -> Option<Tracker<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().tracker(key).cloned()
    }

    /// Inserts or updates a key, returning the previous value.
    ///
    /// The capacity check, any eviction, and the insert happen under one
    /// lock acquisition.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.segment.lock().put(key, value)
    }

    /// Removes a key, returning its value if it existed.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().remove(key)
    }

    /// Removes and returns the entry the next eviction would forget.
    pub fn pop(&self) -> Option<(K, V)> {
        self.segment.lock().forget()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.segment.lock().clear();
    }
}

impl<K, V, S> CacheMetrics for ConcurrentForgettingMap<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.lock().metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentForgettingMap"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentForgettingMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("ConcurrentForgettingMap");
        // Never block here: the caller may already hold the lock.
        match self.segment.try_lock() {
            Some(segment) => s.field("segment", &*segment),
            None => s.field("segment", &format_args!("<locked>")),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::string::ToString;
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    #[test]
    fn test_basic_operations() {
        let map: ConcurrentForgettingMap<String, i32> =
            ConcurrentForgettingMap::new(NonZeroUsize::new(10).unwrap());

        assert_eq!(map.put("a".to_string(), 1), None);
        assert_eq!(map.put("b".to_string(), 2), None);

        assert_eq!(map.get("a"), Some(1));
        assert_eq!(map.get("b"), Some(2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_reference_scenario() {
        let map: ConcurrentForgettingMap<String, String> =
            ConcurrentForgettingMap::new(NonZeroUsize::new(3).unwrap());

        map.put("K1".to_string(), "V1".to_string());
        map.put("K2".to_string(), "V2".to_string());
        map.put("K3".to_string(), "V3".to_string());
        assert_eq!(map.size(), 3);

        map.put("K1".to_string(), "V1".to_string());
        map.put("K1".to_string(), "V1".to_string());
        map.get("K1");
        map.put("K3".to_string(), "V3".to_string());
        map.put("K3".to_string(), "V3".to_string());
        map.get("K3");
        map.get("K3");

        map.put("K4".to_string(), "V4".to_string());

        assert_eq!(map.get("K1").as_deref(), Some("V1"));
        assert_eq!(map.get("K3").as_deref(), Some("V3"));
        assert_eq!(map.get("K4").as_deref(), Some("V4"));
        assert_eq!(map.get("K2"), None);
        assert_eq!(map.size(), 3);
    }

    #[test]
    fn test_concurrent_access() {
        let map: Arc<ConcurrentForgettingMap<String, i32>> =
            Arc::new(ConcurrentForgettingMap::new(NonZeroUsize::new(50).unwrap()));
        let num_threads = 8;
        let ops_per_thread = 500;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let map = Arc::clone(&map);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("key_{}_{}", t, i % 20);
                    map.put(key.clone(), i);
                    if i % 3 == 0 {
                        let _ = map.get(&key);
                    }
                    assert!(map.len() <= 50);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(map.len(), 50);
    }

    #[test]
    fn test_get_with() {
        let map: ConcurrentForgettingMap<String, String> =
            ConcurrentForgettingMap::new(NonZeroUsize::new(10).unwrap());

        map.put("key".to_string(), "hello world".to_string());

        let len = map.get_with("key", |v: &String| v.len());
        assert_eq!(len, Some(11));
        assert_eq!(map.tracker("key").unwrap().operation_count(), 2);

        let missing = map.get_with("missing", |v: &String| v.len());
        assert_eq!(missing, None);
    }

    #[test]
    fn test_remove_and_clear() {
        let map: ConcurrentForgettingMap<String, i32> =
            ConcurrentForgettingMap::new(NonZeroUsize::new(10).unwrap());

        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);

        assert_eq!(map.remove("key1"), Some(1));
        assert_eq!(map.remove("key1"), None);
        assert_eq!(map.len(), 1);

        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_peek_and_pop() {
        let map: ConcurrentForgettingMap<&str, i32> =
            ConcurrentForgettingMap::new(NonZeroUsize::new(3).unwrap());

        map.put("a", 1);
        map.put("b", 2);
        let _ = map.get(&"b");

        assert_eq!(map.peek(&"a"), Some(1));
        assert!(map.contains_key(&"a"));
        assert_eq!(map.pop(), Some(("a", 1)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_debug_does_not_block_while_locked() {
        let map: ConcurrentForgettingMap<&str, i32> =
            ConcurrentForgettingMap::new(NonZeroUsize::new(2).unwrap());
        map.put("a", 1);

        let unlocked = std::format!("{:?}", map);
        assert!(unlocked.contains("ForgettingSegment"));

        let inside = map
            .get_with(&"a", |v| std::format!("{} {:?}", v, map))
            .unwrap();
        assert!(inside.starts_with("1 ConcurrentForgettingMap"));
        assert!(inside.contains("<locked>"));
    }

    #[test]
    fn test_try_new_and_metrics() {
        assert!(ConcurrentForgettingMap::<String, i32>::try_new(0).is_err());

        let map = ConcurrentForgettingMap::<String, i32>::try_new(1).unwrap();
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);

        let metrics = map.metrics();
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(map.algorithm_name(), "ConcurrentForgettingMap");
        assert_eq!(map.max_entries().get(), 1);
    }
}
