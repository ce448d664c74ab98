//! Forgettability Ranking
//!
//! Orders [`Tracker`]s so that the **more forgettable** one sorts last. When
//! a full map needs room, the victim is the maximum under this order.
//!
//! # Ranking Rules
//!
//! Evaluated in sequence, each rule only consulted when the previous one ties:
//!
//! ```text
//! 1. operation_count     fewer operations        ──▶ more forgettable
//! 2. last_operation_at   never touched           ──▶ more forgettable
//!                        touched longer ago      ──▶ more forgettable
//! 3. created_at          created earlier         ──▶ more forgettable
//! 4. otherwise           Ordering::Equal
//! ```
//!
//! A full tie is reported as `Equal` so that `compare(a, b)` is always the
//! reverse of `compare(b, a)`. Inside a map this case cannot happen, since
//! every tracker gets a distinct `created_at` from the map's clock.
//!
//! # Victim Search
//!
//! [`most_forgettable`] is a single pass that keeps the best candidate seen
//! so far. It neither sorts nor allocates, which matters because it runs
//! while the map is locked.
//!
//! # Examples
//!
//! ```
//! use forgetting_map::selector::{compare, most_forgettable};
//! use forgetting_map::tracker::Tracker;
//! use core::cmp::Ordering;
//!
//! let mut hot = Tracker::new("hot", 1);
//! let cold = Tracker::new("cold", 2);
//! hot.record_operation(3);
//!
//! assert_eq!(compare(&cold, &hot), Ordering::Greater);
//!
//! let trackers = [hot, cold];
//! assert_eq!(most_forgettable(trackers.iter()).map(|t| *t.key()), Some("cold"));
//! ```

use crate::tracker::Tracker;
use core::cmp::Ordering;

/// Compares two trackers by forgettability.
///
/// Returns [`Ordering::Greater`] when `a` is the better eviction victim,
/// [`Ordering::Less`] when `b` is, and [`Ordering::Equal`] on a full tie.
pub fn compare<K>(a: &Tracker<K>, b: &Tracker<K>) -> Ordering {
    // Fewer operations is more forgettable, hence the reversed comparison.
    b.operation_count()
        .cmp(&a.operation_count())
        .then_with(|| compare_last_operation(a, b))
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

fn compare_last_operation<K>(a: &Tracker<K>, b: &Tracker<K>) -> Ordering {
    match (a.last_operation_at(), b.last_operation_at()) {
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(at_a), Some(at_b)) => at_b.cmp(&at_a),
        (None, None) => Ordering::Equal,
    }
}

/// Returns the most forgettable tracker, or `None` if there are none.
///
/// On a full tie the earliest tracker in iteration order wins.
pub fn most_forgettable<'a, K, I>(trackers: I) -> Option<&'a Tracker<K>>
where
    K: 'a,
    I: IntoIterator<Item = &'a Tracker<K>>,
{
    let mut trackers = trackers.into_iter();
    let mut victim = trackers.next()?;
    for candidate in trackers {
        if compare(candidate, victim) == Ordering::Greater {
            victim = candidate;
        }
    }
    Some(victim)
}
