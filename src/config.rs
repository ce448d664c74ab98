//! Forgetting Map Configuration
//!
//! Configuration for both [`ForgettingMap`](crate::ForgettingMap) and
//! [`ConcurrentForgettingMap`](crate::ConcurrentForgettingMap). The config has
//! a single public field, so it can be built as a plain struct literal:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: `max_entries` is a `NonZeroUsize`, so a map that can
//!   never hold an entry is unrepresentable
//! - **Fallible path**: [`ForgettingMapConfig::try_new`] for capacities that
//!   come from user input
//!
//! # Sizing Guidelines
//!
//! Eviction scans every live entry once to find the victim, so a `put` of a
//! new key into a full map costs O(`max_entries`). Pick `max_entries` in the
//! hundreds or low thousands; for very large caches a frequency-bucketed LFU
//! is a better fit.
//!
//! # Examples
//!
//! ```
//! use forgetting_map::config::ForgettingMapConfig;
//! use forgetting_map::ForgettingMap;
//! use core::num::NonZeroUsize;
//!
//! let config = ForgettingMapConfig {
//!     max_entries: NonZeroUsize::new(100).unwrap(),
//! };
//!
//! let map: ForgettingMap<String, i32> = ForgettingMap::init(config, None);
//! assert_eq!(map.max_entries().get(), 100);
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a forgetting map.
///
/// # Fields
///
/// - `max_entries`: Maximum number of live keys the map can hold at once
///
/// # Examples
///
/// ```
/// use forgetting_map::config::ForgettingMapConfig;
///
/// let config = ForgettingMapConfig::try_new(3).unwrap();
/// assert_eq!(config.max_entries.get(), 3);
///
/// assert!(ForgettingMapConfig::try_new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ForgettingMapConfig {
    /// Maximum number of key-value pairs the map can hold
    pub max_entries: NonZeroUsize,
}

impl ForgettingMapConfig {
    /// Creates a configuration with the given capacity.
    #[must_use]
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self { max_entries }
    }

    /// Creates a configuration from a plain integer, rejecting zero.
    pub fn try_new(max_entries: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(max_entries)
            .map(Self::new)
            .ok_or(ConfigError::ZeroCapacity)
    }
}

impl fmt::Debug for ForgettingMapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForgettingMapConfig")
            .field("max_entries", &self.max_entries)
            .finish()
    }
}
