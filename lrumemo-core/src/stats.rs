//! Hit and miss counters reported by the memoizers.

/// Snapshot of a memoizer's counters.
///
/// Every call to `get` counts as a call; the calls that had to run the wrapped
/// function also count as misses. A failed computation is still a miss.
///
/// # Examples
///
/// ```
/// use lrumemo_core::Lru;
/// use std::convert::Infallible;
///
/// let mut lru = Lru::new(|x: &u32| Ok::<_, Infallible>(x + 1), 4).unwrap();
/// let _ = lru.get(&1);
/// let _ = lru.get(&1);
/// let _ = lru.get(&2);
///
/// let stats = lru.stats();
/// assert_eq!(stats.calls, 3);
/// assert_eq!(stats.misses, 2);
/// assert_eq!(stats.hits(), 1);
/// assert!((stats.hit_rate() - 0.3333).abs() < 0.001);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of `get` calls.
    pub calls: u64,
    /// Calls that ran the wrapped function.
    pub misses: u64,
    /// Entries cached when the snapshot was taken.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

impl CacheStats {
    /// Returns the number of calls answered from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.calls.saturating_sub(self.misses)
    }

    /// Calculates the cache hit rate as a fraction (0.0 to 1.0).
    ///
    /// Returns 0.0 if there have been no calls.
    #[inline]
    pub fn hit_rate(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.hits() as f64 / self.calls as f64
        }
    }

    /// Calculates the cache miss rate as a fraction (0.0 to 1.0).
    #[inline]
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }
}
