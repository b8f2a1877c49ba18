//! Single-owner memoizer over a bounded LRU index.

use std::fmt::{self, Debug};
use std::hash::Hash;

use tracing::{debug, trace};

use crate::{CacheConfig, CacheIndex, CacheStats, Compute, ConfigError};

/// Memoizes a [`Compute`] function behind a bounded LRU cache.
///
/// `Lru` has no internal synchronization: [`get`](Lru::get) takes `&mut self`,
/// so a single owner drives it at a time. Share results across threads with
/// [`ConcurrentLru`](crate::ConcurrentLru) instead.
///
/// # Type Parameters
///
/// * `K` - The key type. Cloned once per cached entry.
/// * `F` - The wrapped function. Its `Value` is what gets cached.
///
/// # Behavior
///
/// - **Hit**: the entry moves to the front of the recency order and its value
///   is returned. The function is not called.
/// - **Miss**: the function runs, its value is inserted at the front, then the
///   least recently used entries are evicted until the capacity is respected.
/// - **Failure**: the function's error is returned as is and nothing is
///   cached, so the next `get` for that key calls the function again.
///
/// # Examples
///
/// ```
/// use lrumemo_core::Lru;
/// use std::convert::Infallible;
///
/// let mut lru = Lru::new(|x: &u32| Ok::<_, Infallible>(x * 2), 2).unwrap();
///
/// assert_eq!(lru.get(&1), Ok(&2)); // miss
/// assert_eq!(lru.get(&2), Ok(&4)); // miss
/// assert_eq!(lru.get(&1), Ok(&2)); // hit, 1 becomes most recent
/// assert_eq!(lru.get(&3), Ok(&6)); // miss, evicts 2
///
/// assert_eq!(lru.keys(), vec![3, 1]);
/// assert_eq!(lru.miss_count(), 3);
/// assert_eq!(lru.call_count(), 4);
/// ```
pub struct Lru<K, F: Compute<K>> {
    func: F,
    index: CacheIndex<K, F::Value>,
    calls: u64,
    misses: u64,
    name: String,
}

impl<K, F> Lru<K, F>
where
    K: Hash + Eq + Clone,
    F: Compute<K>,
{
    /// Wraps `func` in a cache holding at most `capacity` values.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `capacity` is 0.
    pub fn new(func: F, capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(func, CacheConfig::new(capacity))
    }

    /// Wraps `func` in a cache built from `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `config.capacity` is 0.
    pub fn with_config(func: F, config: CacheConfig) -> Result<Self, ConfigError> {
        let capacity = config.validate()?;
        Ok(Self {
            func,
            index: CacheIndex::new(capacity)?,
            calls: 0,
            misses: 0,
            name: config.name,
        })
    }

    /// Returns the value for `key`, computing and caching it on a miss.
    ///
    /// # Errors
    ///
    /// Whatever the wrapped function returns for `key`. Errors are not cached.
    pub fn get(&mut self, key: &K) -> Result<&F::Value, F::Error> {
        self.calls += 1;
        if let Some(slot) = self.index.slot(key) {
            trace!(cache = %self.name, "hit");
            return Ok(self.index.promote(slot));
        }

        self.misses += 1;
        let value = match self.func.compute(key) {
            Ok(value) => value,
            Err(err) => {
                debug!(cache = %self.name, "computation failed, nothing cached");
                return Err(err);
            }
        };
        self.index.insert_front(key.clone(), value);
        let evicted = self.index.evict_while_over_capacity();
        debug!(cache = %self.name, evicted, len = self.index.len(), "miss");
        Ok(self.index.most_recent())
    }

    /// Returns true if `key` is cached, without promoting it or counting a call.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Cached keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.index.keys()
    }

    /// Removes `key` if its cached value satisfies `pred`. Returns true when
    /// an entry was removed.
    pub(crate) fn discard_if(&mut self, key: &K, pred: impl FnOnce(&F::Value) -> bool) -> bool {
        let matched = self.index.peek(key).map_or(false, pred);
        if matched {
            self.index.remove(key);
        }
        matched
    }
}

impl<K, F: Compute<K>> Lru<K, F> {
    /// Total number of `get` calls.
    pub fn call_count(&self) -> u64 {
        self.calls
    }

    /// Number of `get` calls that ran the wrapped function.
    pub fn miss_count(&self) -> u64 {
        self.misses
    }

    /// Maximum number of cached values.
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Name reported in log events.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            calls: self.calls,
            misses: self.misses,
            len: self.index.len(),
            capacity: self.index.capacity(),
        }
    }
}

impl<K, F: Compute<K>> Debug for Lru<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lru")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}
