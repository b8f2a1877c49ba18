//! # lrumemo
//!
//! A small memoization library for Rust: wrap an expensive, pure function and
//! keep its most recently used results in a bounded cache.
//!
//! ## Features
//!
//! - **Bounded**: at most `capacity` results are kept, least recently used evicted first
//! - **O(1) operations**: lookups, promotions and evictions run in constant time
//! - **Thread-safe variant**: [`ConcurrentLru`] can be shared between threads
//! - **Single-flight**: concurrent misses on the same key run the function once
//! - **Result-aware**: failed computations are never cached
//! - **Type-safe**: any `Fn(&K) -> Result<V, E>` can be wrapped
//!
//! ## Quick Start
//!
//! ```rust
//! use lrumemo::Lru;
//! use std::convert::Infallible;
//!
//! fn fibonacci(n: &u32) -> Result<u64, Infallible> {
//!     let (mut a, mut b) = (0u64, 1u64);
//!     for _ in 0..*n {
//!         (a, b) = (b, a + b);
//!     }
//!     Ok(a)
//! }
//!
//! let mut cache = Lru::new(fibonacci, 100).unwrap();
//!
//! // First call computes the result
//! assert_eq!(cache.get(&50), Ok(&12_586_269_025));
//! // Second call returns the cached result
//! assert_eq!(cache.get(&50), Ok(&12_586_269_025));
//! assert_eq!(cache.miss_count(), 1);
//! ```
//!
//! ## Sharing a Cache Between Threads
//!
//! ```rust
//! use lrumemo::ConcurrentLru;
//! use std::convert::Infallible;
//! use std::thread;
//!
//! let cache = ConcurrentLru::new(|id: &u32| Ok::<_, Infallible>(format!("stop_point:{}", id)), 64)
//!     .unwrap();
//!
//! thread::scope(|s| {
//!     for _ in 0..8 {
//!         s.spawn(|| assert_eq!(*cache.get(&7).unwrap(), "stop_point:7"));
//!     }
//! });
//!
//! // eight callers, one computation
//! assert_eq!(cache.miss_count(), 1);
//! ```
//!
//! ## Error Handling
//!
//! Functions returning `Err` are not cached; the next call tries again:
//!
//! ```rust
//! use lrumemo::Lru;
//!
//! let mut cache = Lru::new(
//!     |b: &i32| if *b == 0 { Err("Division by zero") } else { Ok(10 / b) },
//!     10,
//! )
//! .unwrap();
//!
//! // Ok results are cached
//! assert_eq!(cache.get(&2), Ok(&5));
//! // Err results are NOT cached
//! assert_eq!(cache.get(&0), Err("Division by zero"));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Configuration
//!
//! A capacity of 0 is rejected when the cache is built:
//!
//! ```rust
//! use lrumemo::{CacheConfig, ConfigError, Lru};
//! use std::convert::Infallible;
//!
//! let double = |x: &u8| Ok::<_, Infallible>(x * 2);
//! assert_eq!(
//!     Lru::new(double, 0).err(),
//!     Some(ConfigError::InvalidCapacity { capacity: 0 })
//! );
//!
//! let cache = Lru::with_config(double, CacheConfig::new(32).with_name("doubles")).unwrap();
//! assert_eq!(cache.capacity(), 32);
//! ```

pub use lrumemo_core::*;
