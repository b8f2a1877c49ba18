//! Construction parameters shared by both memoizers.

use crate::ConfigError;

/// Capacity used by [`CacheConfig::default`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Configuration of a memoizing cache.
///
/// The `name` only appears in `tracing` events, so several caches in one
/// process can be told apart in logs.
///
/// # Examples
///
/// ```
/// use lrumemo_core::{CacheConfig, DEFAULT_CAPACITY};
///
/// let config = CacheConfig::default();
/// assert_eq!(config.capacity, DEFAULT_CAPACITY);
///
/// let config = CacheConfig::new(256).with_name("stop_areas");
/// assert_eq!(config.validate(), Ok(256));
/// assert_eq!(config.name, "stop_areas");
///
/// assert!(CacheConfig::new(0).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Must be at least 1.
    pub capacity: usize,
    /// Label attached to every log event of the cache.
    pub name: String,
}

impl CacheConfig {
    /// Creates a configuration with the given capacity and the default name.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Sets the name reported in log events.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Checks the configuration and returns the validated capacity.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when the capacity is 0.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if self.capacity < 1 {
            return Err(ConfigError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(self.capacity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            name: "lru".to_string(),
        }
    }
}

impl From<usize> for CacheConfig {
    fn from(capacity: usize) -> Self {
        Self::new(capacity)
    }
}
