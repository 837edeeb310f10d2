// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_kdtree::{KdTree, Norm, Point, Scalar, Value};

const N: usize = 10_000;
const QUERIES: usize = 1_000;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn next_i32(&mut self, span: i32) -> i32 {
        (self.next_u64() % span as u64) as i32 - span / 2
    }
}

fn gen_points_f64(count: usize, seed: u64) -> Vec<Point<f64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * 2000.0 - 1000.0, rng.next_f64() * 2000.0 - 1000.0))
        .collect()
}

fn gen_points_i32(count: usize, seed: u64) -> Vec<Point<i32>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_i32(20_000), rng.next_i32(20_000)))
        .collect()
}

fn values<T: Scalar>(points: &[Point<T>]) -> Vec<Value<T, i64>> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| Value::new(*p, i as i64))
        .collect()
}

fn fill<T: Scalar>(points: &[Point<T>]) -> KdTree<T, i64> {
    let mut tree = KdTree::new();
    for (i, p) in points.iter().enumerate() {
        tree.insert(*p, i as i64);
    }
    tree
}

fn run_group<T: Scalar>(c: &mut Criterion, label: &str, points: &[Point<T>], queries: &[Point<T>]) {
    let mut group = c.benchmark_group(format!("kdtree_{label}"));
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function(format!("insert_n{}", points.len()), |b| {
        b.iter(|| black_box(fill(points)));
    });

    group.bench_function(format!("insert_then_rebalance_n{}", points.len()), |b| {
        b.iter(|| {
            let mut tree = fill(points);
            tree.rebalance();
            black_box(tree)
        });
    });

    group.bench_function(format!("bulk_build_n{}", points.len()), |b| {
        b.iter_batched(
            || values(points),
            |vals| black_box(KdTree::from_values(vals)),
            BatchSize::SmallInput,
        );
    });

    let tree = fill(points);

    group.bench_function("iterate_into_vec", |b| {
        b.iter(|| {
            let all: Vec<_> = tree.iter().collect();
            black_box(all.len())
        });
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("find", |b| {
        b.iter(|| {
            let hits = queries
                .iter()
                .zip(points)
                .filter(|(q, p)| tree.exists(q) || tree.exists(p))
                .count();
            black_box(hits)
        });
    });

    for (name, norm) in [("l1", Norm::L1), ("l2", Norm::L2), ("linf", Norm::Linf)] {
        group.bench_function(format!("find_closest_{name}"), |b| {
            b.iter(|| {
                for q in queries {
                    black_box(tree.find_closest(q, norm));
                }
            });
        });
    }

    group.bench_function("insert_pop_closest", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for (i, q) in queries.iter().enumerate() {
                    tree.insert(*q, i as i64);
                    black_box(tree.pop_closest(q, Norm::L2));
                }
                tree
            },
            BatchSize::LargeInput,
        );
    });

    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("rebalance", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                tree.rebalance();
                tree
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_f64(c: &mut Criterion) {
    let points = gen_points_f64(N, 0xCAFE_F00D_DEAD_BEEF);
    let queries = gen_points_f64(QUERIES, 0xFACE_FEED_CAFE_BABE);
    run_group(c, "f64", &points, &queries);
}

fn bench_i32(c: &mut Criterion) {
    let points = gen_points_i32(N, 0xBADC_F00D_1234_5678);
    let queries = gen_points_i32(QUERIES, 0xC1A5_7E55_9999_ABCD);
    run_group(c, "i32", &points, &queries);
}

fn bench_monotonic(c: &mut Criterion) {
    // Worst case for an unbalanced tree; exercises the rebalance trigger.
    let mut group = c.benchmark_group("kdtree_monotonic");
    for &n in &[1_024_i32, 8_192] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_diagonal_n{n}"), |b| {
            b.iter(|| {
                let mut tree = KdTree::new();
                for i in 0..n {
                    tree.insert(Point::new(i, i), ());
                }
                black_box(tree.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_f64, bench_i32, bench_monotonic);
criterion_main!(benches);
