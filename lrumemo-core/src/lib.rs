//! # lrumemo Core
//!
//! Bounded memoization of pure functions under a least-recently-used policy.
//!
//! This crate provides the building blocks used by the `lrumemo` facade: an
//! O(1) recency-ordered index, a single-owner memoizer built on it, and a
//! thread-safe memoizer that runs the wrapped function at most once per key
//! even when many threads miss on the same key at the same time.
//!
//! ## Features
//!
//! - **Cache Index**: hash map plus arena-backed doubly linked list, O(1) promote and evict
//! - **Single-Owner Memoizer**: `&mut self` access, no locking at all
//! - **Concurrent Memoizer**: a short structural lock plus a one-shot handle per key
//! - **Single-flight misses**: concurrent callers of an uncached key share one computation
//! - **No negative caching**: a failed computation is retried by the next caller
//! - **Statistics**: call/miss counters and hit rate snapshots
//!
//! ## Module Organization
//!
//! - [`compute`] - The wrapped function interface
//! - [`config`] - Construction parameters
//! - [`index`] - Recency-ordered key/value store
//! - [`lru`] - Single-owner memoizer
//! - [`concurrent`] - Thread-safe, single-flight memoizer
//!
//! ## Example
//!
//! ```
//! use lrumemo_core::{ConcurrentLru, Lru};
//! use std::convert::Infallible;
//!
//! let mut lru = Lru::new(|x: &u64| Ok::<_, Infallible>(x * 2), 2).unwrap();
//! assert_eq!(lru.get(&21), Ok(&42));
//!
//! let shared = ConcurrentLru::new(|x: &u64| Ok::<_, Infallible>(x * 2), 2).unwrap();
//! assert_eq!(*shared.get(&21).unwrap(), 42);
//! ```
pub mod compute;
pub mod concurrent;
pub mod config;
mod error;
mod flight;
pub mod index;
pub mod lru;
mod stats;

pub use compute::Compute;
pub use concurrent::ConcurrentLru;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::ConfigError;
pub use index::CacheIndex;
pub use lru::Lru;
pub use stats::CacheStats;
