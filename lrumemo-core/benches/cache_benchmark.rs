use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lrumemo_core::{CacheIndex, ConcurrentLru, Lru};
use std::convert::Infallible;
use std::hint::black_box;
use std::thread;

fn square(x: &u64) -> Result<u64, Infallible> {
    Ok(x.wrapping_mul(*x))
}

fn bench_index_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_insert_evict");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut index = CacheIndex::new(size / 2).unwrap();
                for i in 0..size {
                    index.insert_front(i, black_box(i));
                    index.evict_while_over_capacity();
                }
            });
        });
    }

    group.finish();
}

fn bench_get_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hits");

    for size in [10u64, 100, 1000].iter() {
        // Pre-populate cache
        let mut lru = Lru::new(square, *size as usize).unwrap();
        for i in 0..*size {
            let _ = lru.get(&i);
        }
        group.bench_with_input(BenchmarkId::new("Lru", size), size, |b, &size| {
            b.iter(|| {
                for i in 0..size {
                    let _ = black_box(lru.get(&i));
                }
            });
        });

        let shared = ConcurrentLru::new(square, *size as usize).unwrap();
        for i in 0..*size {
            let _ = shared.get(&i);
        }
        group.bench_with_input(BenchmarkId::new("ConcurrentLru", size), size, |b, &size| {
            b.iter(|| {
                for i in 0..size {
                    let _ = black_box(shared.get(&i));
                }
            });
        });
    }

    group.finish();
}

fn bench_get_misses(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_misses");

    group.bench_function("Lru", |b| {
        b.iter(|| {
            let mut lru = Lru::new(square, 50).unwrap();
            // 100 distinct keys through 50 slots
            for i in 0..100u64 {
                let _ = black_box(lru.get(&i));
            }
        });
    });

    group.bench_function("ConcurrentLru", |b| {
        b.iter(|| {
            let shared = ConcurrentLru::new(square, 50).unwrap();
            for i in 0..100u64 {
                let _ = black_box(shared.get(&i));
            }
        });
    });

    group.finish();
}

fn bench_concurrent_gets(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_gets");

    for num_threads in [2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let shared = ConcurrentLru::new(square, 100).unwrap();
                    thread::scope(|s| {
                        for thread_id in 0..num_threads {
                            let shared = &shared;
                            s.spawn(move || {
                                // overlapping key ranges: half shared, half private
                                for i in 0..100u64 {
                                    let key = if i % 2 == 0 { i } else { thread_id * 1000 + i };
                                    let _ = black_box(shared.get(&key));
                                }
                            });
                        }
                    });
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_index_insert_evict,
    bench_get_hits,
    bench_get_misses,
    bench_concurrent_gets
);
criterion_main!(benches);
