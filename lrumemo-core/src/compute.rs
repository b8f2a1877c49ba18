//! The function interface wrapped by the memoizers.

/// A pure mapping from keys to values that may fail.
///
/// Memoizers call [`compute`](Compute::compute) on a cache miss and keep the
/// successful result. Implementors must uphold two properties that the cache
/// relies on but cannot check:
///
/// - **Purity**: the same key always yields an equal value, and computing has
///   no observable side effect.
/// - **Concurrency**: calls for *distinct* keys may run at the same time on
///   different threads (only relevant to [`ConcurrentLru`](crate::ConcurrentLru)).
///
/// Every `Fn(&K) -> Result<V, E>` implements this trait, so closures and plain
/// functions can be wrapped directly.
///
/// # Examples
///
/// ```
/// use lrumemo_core::Compute;
///
/// fn parse(s: &String) -> Result<i64, std::num::ParseIntError> {
///     s.parse()
/// }
///
/// assert_eq!(parse.compute(&"12".to_string()), Ok(12));
/// assert!(parse.compute(&"x".to_string()).is_err());
/// ```
pub trait Compute<K> {
    /// Value produced for a key.
    type Value;
    /// Failure reported for a key. It is never cached.
    type Error;

    /// Computes the value for `key`.
    fn compute(&self, key: &K) -> Result<Self::Value, Self::Error>;
}

impl<K, V, E, T> Compute<K> for T
where
    T: Fn(&K) -> Result<V, E>,
{
    type Value = V;
    type Error = E;

    #[inline]
    fn compute(&self, key: &K) -> Result<V, E> {
        self(key)
    }
}
