//! Tests for seeding one concurrent cache from another

use lrumemo::{CacheConfig, ConcurrentLru};
use std::convert::Infallible;

fn square(x: &u32) -> Result<u32, Infallible> {
    Ok(x * x)
}

/// Warming an empty cache reproduces the source's recency order
#[test]
fn test_warmup_fidelity() {
    let source = ConcurrentLru::new(square, 10).unwrap();
    // touch c, b, a so that a is the most recent
    for key in [3, 2, 1] {
        source.get(&key).unwrap();
    }

    let target = ConcurrentLru::new(square, 3).unwrap();
    target.warmup(&source).unwrap();

    assert_eq!(target.keys(), vec![1, 2, 3]);
    assert_eq!(target.miss_count(), 3);
    assert_eq!(target.call_count(), 3);
    // the source is only read
    assert_eq!(source.call_count(), 3);
}

/// Later promotions in the source are reflected in the snapshot
#[test]
fn test_warmup_after_promotion() {
    let source = ConcurrentLru::new(square, 10).unwrap();
    for key in [1, 2, 3, 1] {
        source.get(&key).unwrap();
    }
    assert_eq!(source.keys(), vec![1, 3, 2]);

    let target = ConcurrentLru::with_config(square, CacheConfig::new(10).with_name("fresh")).unwrap();
    target.warmup(&source).unwrap();
    assert_eq!(target.keys(), source.keys());
}

/// Keys already cached in the target are promoted, not recomputed
#[test]
fn test_warmup_into_populated_cache() {
    let source = ConcurrentLru::new(square, 10).unwrap();
    for key in [2, 1] {
        source.get(&key).unwrap();
    }

    let target = ConcurrentLru::new(square, 10).unwrap();
    for key in [1, 9] {
        target.get(&key).unwrap();
    }
    target.warmup(&source).unwrap();

    assert_eq!(target.keys(), vec![1, 2, 9]);
    assert_eq!(target.miss_count(), 3);
}

/// Warming from an empty cache does nothing
#[test]
fn test_warmup_from_empty_source() {
    let source = ConcurrentLru::new(square, 4).unwrap();
    let target = ConcurrentLru::new(square, 4).unwrap();
    target.warmup(&source).unwrap();
    assert!(target.is_empty());
    assert_eq!(target.call_count(), 0);
}
