use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use forgetting_map::config::ForgettingMapConfig;
use forgetting_map::ForgettingMap;
use std::num::NonZeroUsize;

// Helper function to create maps with the init pattern
fn make_map<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> ForgettingMap<K, V> {
    let config = ForgettingMapConfig {
        max_entries: NonZeroUsize::new(cap).unwrap(),
    };
    ForgettingMap::init(config, None)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const MAP_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Forgetting Map Operations");

    {
        let mut map = make_map(MAP_SIZE);
        for i in 0..MAP_SIZE {
            map.put(i, i);
        }

        group.bench_function("get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.get(&(i % MAP_SIZE)));
                }
            });
        });

        group.bench_function("get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.get(&(i + MAP_SIZE)));
                }
            });
        });

        group.bench_function("put update", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.put(i % MAP_SIZE, i));
                }
            });
        });

        group.bench_function("peek", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.peek(&(i % MAP_SIZE)));
                }
            });
        });
    }

    group.finish();
}

/// Eviction cost grows with the number of live trackers the scan visits.
pub fn eviction_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forgetting Map Eviction");

    for size in [16usize, 128, 1024, 8192] {
        let mut map = make_map(size);
        for i in 0..size {
            map.put(i, i);
            for _ in 0..(i % 4) {
                map.get(&i);
            }
        }

        let mut next = size;
        group.bench_with_input(BenchmarkId::new("put new key", size), &size, |b, _| {
            b.iter(|| {
                next += 1;
                black_box(map.put(next, next));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark, eviction_benchmark);
criterion_main!(benches);
