//! Lazily run, shared computation handles behind `ConcurrentLru`.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::Compute;

/// Outcome shared by everyone holding the same [`Flight`].
pub(crate) type Outcome<F, K> = Result<Arc<<F as Compute<K>>::Value>, <F as Compute<K>>::Error>;

/// One-shot, lazily run computation of a single key.
///
/// The flight owns its key and a handle on the function, so it stays valid
/// after the call that created it has returned. It runs nothing until the
/// first [`resolve`](Flight::resolve); concurrent resolvers park on the cell
/// until that one run finishes and then all read the same outcome.
pub(crate) struct Flight<K, F: Compute<K>> {
    key: K,
    func: Arc<F>,
    outcome: OnceCell<Outcome<F, K>>,
}

impl<K, F: Compute<K>> Flight<K, F> {
    pub(crate) fn new(key: K, func: Arc<F>) -> Self {
        Self {
            key,
            func,
            outcome: OnceCell::new(),
        }
    }

    /// Runs the computation if nobody has yet, otherwise waits for and returns
    /// the outcome of the run that did.
    ///
    /// If the function panics, the flight stays pending and the next resolver
    /// runs it again.
    pub(crate) fn resolve(&self) -> &Outcome<F, K> {
        self.outcome
            .get_or_init(|| self.func.compute(&self.key).map(Arc::new))
    }

    /// Returns true once the computation has finished with an error.
    pub(crate) fn failed(&self) -> bool {
        matches!(self.outcome.get(), Some(Err(_)))
    }

    /// Outcome, if the computation already finished.
    #[cfg(test)]
    pub(crate) fn outcome(&self) -> Option<&Outcome<F, K>> {
        self.outcome.get()
    }

    #[cfg(test)]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }
}

/// The function the inner [`Lru`](crate::Lru) of a
/// [`ConcurrentLru`](crate::ConcurrentLru) memoizes: it turns a key into a
/// pending [`Flight`] without running anything.
pub(crate) struct Launcher<F> {
    func: Arc<F>,
}

impl<F> Launcher<F> {
    pub(crate) fn new(func: F) -> Self {
        Self {
            func: Arc::new(func),
        }
    }
}

impl<K, F> Compute<K> for Launcher<F>
where
    K: Clone,
    F: Compute<K>,
{
    type Value = Arc<Flight<K, F>>;
    type Error = std::convert::Infallible;

    fn compute(&self, key: &K) -> Result<Self::Value, Self::Error> {
        Ok(Arc::new(Flight::new(key.clone(), Arc::clone(&self.func))))
    }
}
