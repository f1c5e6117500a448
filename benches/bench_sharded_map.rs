use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rwshard::*;

fn criterion_benchmark(c: &mut Criterion) {
    let count: u32 = 1 << 20;
    c.bench_with_input(
        BenchmarkId::new("set_into_sharded_map", count),
        &count,
        |b, &count| {
            b.iter(|| {
                let map =
                    ShardedMap::<u32, u32>::with_capacity_and_shard_amount(1 << 15, 256).unwrap();
                for i in 0..count {
                    map.set(i, i);
                }
            })
        },
    );

    let map = ShardedMap::<u32, u32>::new(32).unwrap();
    for i in 0..1000 {
        map.set(i, i);
    }
    c.bench_with_input(
        BenchmarkId::new("get_from_sharded_map", count),
        &count,
        |b, &count| {
            b.iter(|| {
                for i in 0..count {
                    std::hint::black_box(map.get(&(i % 1000)));
                }
            })
        },
    );

    c.bench_function("parallel_set_into_sharded_map", |b| {
        b.iter(|| {
            let map = ShardedMap::<usize, usize>::new(64).unwrap();
            std::thread::scope(|s| {
                for t in 0..8usize {
                    let map = &map;
                    s.spawn(move || {
                        for i in 0..(1 << 14) {
                            map.set(t << 14 | i, i);
                        }
                    });
                }
            });
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
