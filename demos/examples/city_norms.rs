// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! L1 vs L2 on the same tree.
//!
//! The closest city to a query depends on the distance metric.
//!
//! Run:
//! - `cargo run -p understory_kdtree_demos --example city_norms`

use understory_kdtree::{KdTree, Norm, Point, Value};

fn main() {
    let cities: KdTree<f64, &str> = [
        ((37.77, -122.42), "San Francisco"),
        ((34.05, -118.24), "Los Angeles"),
        ((37.34, -121.89), "San Jose"),
        ((38.58, -121.49), "Sacramento"),
    ]
    .into_iter()
    .map(|(p, name)| Value::new(Point::from(p), name))
    .collect();

    let query = Point::new(37.50, -122.00);
    println!("query location: {query}");
    for (label, norm) in [
        ("L2/Euclidean", Norm::L2),
        ("L1/Manhattan", Norm::L1),
        ("Linf/Chebyshev", Norm::Linf),
    ] {
        let closest = cities.find_closest(&query, norm);
        println!(
            "closest ({label}): {} at {} (distance {:.4})",
            closest.payload,
            closest.point,
            norm.distance(&closest.point, &query)
        );
    }
    println!("\n{}", cities.balance());
}
