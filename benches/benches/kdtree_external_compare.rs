// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_kdtree::{KdTree, Norm, Point, Value};

use rstar::RTree;

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as f64 * cell, y as f64 * cell));
        }
    }
    out
}

fn to_rstar_points(v: &[Point<f64>]) -> Vec<[f64; 2]> {
    v.iter().map(|p| [p.x, p.y]).collect()
}

fn bench_nearest_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_external_compare_f64");
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, 10.0);
        let extent = n as f64 * 10.0;
        let queries: Vec<Point<f64>> = (0..256)
            .map(|i| Point::new(f64::from(i) * 3.7 % extent, f64::from(i) * 5.3 % extent))
            .collect();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter(|| {
                let mut tree = KdTree::new();
                for (i, p) in points.iter().enumerate() {
                    tree.insert(*p, i as u32);
                }
                for q in &queries {
                    black_box(tree.find_closest(q, Norm::L2));
                }
            });
        });

        group.bench_function(format!("understory_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || {
                    let entries: Vec<_> = points
                        .iter()
                        .enumerate()
                        .map(|(i, p)| Value::new(*p, i as u32))
                        .collect();
                    entries
                },
                |entries| {
                    let tree = KdTree::from_values(entries);
                    for q in &queries {
                        black_box(tree.find_closest(q, Norm::L2));
                    }
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    for q in &queries {
                        black_box(tree.nearest_neighbor(&[q.x, q.y]));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_external_compare_f64);
criterion_main!(benches);
