//! Error types for the forgetting map.
//!
//! The map itself has no runtime failure modes: lookups and removals of
//! absent keys return `None`, and eviction is part of a normal `put`. The
//! only thing that can go wrong is asking for a map that can never hold an
//! entry.
//!
//! ```
//! use forgetting_map::error::ConfigError;
//! use forgetting_map::ForgettingMap;
//!
//! let map: Result<ForgettingMap<&str, i32>, ConfigError> = ForgettingMap::try_new(0);
//! assert_eq!(map.unwrap_err(), ConfigError::ZeroCapacity);
//! ```

use thiserror::Error;

/// Error returned when a map configuration is invalid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_entries` was zero.
    #[error("max_entries must be at least 1")]
    ZeroCapacity,
}
