//! Thread-safe memoizer that runs the wrapped function at most once per key.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::flight::{Flight, Launcher};
use crate::{CacheConfig, CacheStats, Compute, ConfigError, Lru};

/// A bounded LRU memoizer that can be shared between threads.
///
/// Internally this is an [`Lru`] whose cached values are pending computation
/// handles rather than results. A `parking_lot::Mutex` guards only the
/// bookkeeping (lookup, insertion, promotion, eviction of handles); the wrapped
/// function always runs with the lock released.
///
/// # Single-flight
///
/// When several threads ask for the same uncached key at once, the first one
/// to reach the lock registers a handle for it and every later caller finds
/// that same handle. The first caller to resolve the handle runs the function;
/// the others block until it finishes and receive the same value (or the same
/// error). Callers of *different* keys never wait for each other's function.
///
/// A handle evicted while its computation is still running is forgotten: a
/// later `get` for that key starts a second computation, independent of the
/// first.
///
/// # Failures
///
/// A failed computation is not cached. Its error is handed to every caller
/// that was waiting on the handle, then the handle is dropped from the index,
/// so the next `get` for the key computes again. A `get` that finds a failed
/// handle not yet dropped replaces it with a fresh one and counts a miss.
///
/// # Thread Safety
///
/// `ConcurrentLru` is `Send` and `Sync` when the key, the function, its value
/// and its error are. The function must tolerate being called concurrently
/// for distinct keys.
///
/// # Examples
///
/// ```
/// use lrumemo_core::ConcurrentLru;
/// use std::convert::Infallible;
/// use std::thread;
///
/// let cache = ConcurrentLru::new(|x: &u64| Ok::<_, Infallible>(x * x), 16).unwrap();
///
/// thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| assert_eq!(*cache.get(&12).unwrap(), 144));
///     }
/// });
///
/// assert_eq!(cache.call_count(), 4);
/// assert_eq!(cache.miss_count(), 1);
/// ```
pub struct ConcurrentLru<K: Clone, F: Compute<K>> {
    inner: Mutex<Lru<K, Launcher<F>>>,
    name: String,
}

impl<K, F> ConcurrentLru<K, F>
where
    K: Hash + Eq + Clone,
    F: Compute<K>,
{
    /// Wraps `func` in a shared cache holding at most `capacity` values.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `capacity` is 0.
    pub fn new(func: F, capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(func, CacheConfig::new(capacity))
    }

    /// Wraps `func` in a shared cache built from `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] when `config.capacity` is 0.
    pub fn with_config(func: F, config: CacheConfig) -> Result<Self, ConfigError> {
        let name = config.name.clone();
        let lru = Lru::with_config(Launcher::new(func), config)?;
        Ok(Self {
            inner: Mutex::new(lru),
            name,
        })
    }

    /// Returns the value for `key`, computing it on a miss.
    ///
    /// Blocks only while another thread is computing the same key.
    ///
    /// # Errors
    ///
    /// The wrapped function's error for `key`, cloned for every caller that
    /// shared the failed computation. Errors are not cached.
    pub fn get(&self, key: &K) -> Result<Arc<F::Value>, F::Error>
    where
        F::Error: Clone,
    {
        let flight = {
            let mut lru = self.inner.lock();
            if lru.discard_if(key, |cached| cached.failed()) {
                debug!(cache = %self.name, "failed computation replaced");
            }
            match lru.get(key) {
                Ok(flight) => Arc::clone(flight),
                Err(never) => match never {},
            }
        };

        match flight.resolve() {
            Ok(value) => Ok(Arc::clone(value)),
            Err(err) => {
                self.discard(key, &flight);
                Err(err.clone())
            }
        }
    }

    /// Fills this cache with the keys of `source`, so that both end up with
    /// the same recency order.
    ///
    /// The keys are snapshotted from `source` and requested here from the
    /// least to the most recently used. Values are computed with this cache's
    /// function.
    ///
    /// `source` may wrap a different function; only its keys are read.
    ///
    /// Neither cache is locked for the whole operation: callers must make sure
    /// nobody else uses this cache, and that `source` does not change, until
    /// warmup returns. Warm a freshly built cache before sharing it.
    ///
    /// # Errors
    ///
    /// Stops at the first key whose computation fails and returns its error.
    ///
    /// # Examples
    ///
    /// ```
    /// use lrumemo_core::ConcurrentLru;
    /// use std::convert::Infallible;
    ///
    /// let old = ConcurrentLru::new(|x: &u32| Ok::<_, Infallible>(x + 1), 8).unwrap();
    /// for k in [3, 2, 1] {
    ///     old.get(&k).unwrap();
    /// }
    ///
    /// let fresh = ConcurrentLru::new(|x: &u32| Ok::<_, Infallible>(x + 1), 8).unwrap();
    /// fresh.warmup(&old).unwrap();
    /// assert_eq!(fresh.keys(), vec![1, 2, 3]);
    /// ```
    pub fn warmup<G: Compute<K>>(&self, source: &ConcurrentLru<K, G>) -> Result<(), F::Error>
    where
        F::Error: Clone,
    {
        let keys = source.keys();
        debug!(cache = %self.name, from = %source.name, keys = keys.len(), "warmup");
        for key in keys.iter().rev() {
            self.get(key)?;
        }
        Ok(())
    }

    /// Cached keys, most recently used first. Keys still being computed are
    /// included.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    /// Returns true if `key` is cached or being computed.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Drops the handle of a failed computation, unless it was already evicted
    /// or replaced by a newer one.
    fn discard(&self, key: &K, flight: &Arc<Flight<K, F>>) {
        let discarded = self
            .inner
            .lock()
            .discard_if(key, |cached| Arc::ptr_eq(cached, flight));
        if discarded {
            debug!(cache = %self.name, "failed computation discarded");
        }
    }
}

impl<K: Clone, F: Compute<K>> ConcurrentLru<K, F> {
    /// Total number of `get` calls.
    pub fn call_count(&self) -> u64 {
        self.inner.lock().call_count()
    }

    /// Number of `get` calls that started a computation.
    pub fn miss_count(&self) -> u64 {
        self.inner.lock().miss_count()
    }

    /// Maximum number of cached values.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Name reported in log events.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consistent snapshot of the counters, taken under the lock.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

impl<K: Clone, F: Compute<K>> Debug for ConcurrentLru<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLru")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}
