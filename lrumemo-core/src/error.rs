//! Errors returned when building a cache.

use thiserror::Error;

/// Errors raised while constructing a cache.
///
/// Construction either succeeds completely or returns one of these; no
/// partially built cache is ever handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested capacity cannot hold a single entry.
    #[error("cache capacity must be strictly positive, got {capacity}")]
    InvalidCapacity { capacity: usize },
}
