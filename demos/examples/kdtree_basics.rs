// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! K-D tree basics.
//!
//! Insert from several point shapes, look values up, query with each norm, and
//! drain an integer grid nearest-first.
//!
//! Run:
//! - `cargo run -p understory_kdtree_demos --example kdtree_basics`

use understory_kdtree::{KdTree, KdTreeF64, KdTreeI32, Norm, Point};

#[derive(Debug)]
struct Player {
    name: &'static str,
    score: u32,
}

fn main() {
    println!("=== Basic usage ===\n");

    let mut tree: KdTreeF64<i64> = KdTree::new();
    tree.insert((1.5, 2.3).into(), 1);
    tree.insert([4.1, 3.7].into(), 2);
    tree.insert(Point::new(0.8, 5.2), 3);
    tree.insert(kurbo::Point::new(3.0, 4.0).into(), 4);

    println!("size: {}", tree.len());
    println!("stats: {}\n", tree.balance_str());

    println!("exists (1.5, 2.3): {}", tree.exists(&Point::new(1.5, 2.3)));
    println!("exists (100, 100): {}", tree.exists(&Point::new(100.0, 100.0)));
    if let Some(found) = tree.find(&Point::new(1.5, 2.3)) {
        println!("found: {found}\n");
    }

    let query = Point::new(3.5, 4.5);
    println!("closest to {query}:");
    for (label, norm) in [
        ("L2 (Euclidean)", Norm::L2),
        ("L1 (Manhattan)", Norm::L1),
        ("Linf (King)   ", Norm::Linf),
    ] {
        println!("  {label}: {}", tree.find_closest(&query, norm));
    }

    println!("\nall values:");
    for value in &tree {
        println!("  {value}");
    }
    println!("\ntree:\n{tree}");

    println!("=== Arbitrary payloads ===\n");

    let mut players = KdTree::new();
    players.insert(Point::new(1.0, 2.0), Player { name: "Alice", score: 100 });
    players.insert(Point::new(3.0, 4.0), Player { name: "Bob", score: 85 });
    players.insert(Point::new(5.0, 1.0), Player { name: "Carol", score: 92 });

    let near = players.find_closest(&Point::new(2.0, 3.0), Norm::L2);
    println!("closest player to (2, 3): {:?} at {}", near.payload, near.point);

    let removed = players.remove(&Point::new(3.0, 4.0));
    println!("removed: {:?}", removed.map(|v| v.payload.name));
    for v in &players {
        println!("  {} ({}) at {}", v.payload.name, v.payload.score, v.point);
    }

    println!("\n=== Manhattan distance on a grid ===\n");

    let mut grid: KdTreeI32<i32> = KdTree::new();
    for x in 0..5 {
        for y in 0..5 {
            grid.insert(Point::new(x, y), x * 5 + y);
        }
    }
    let center = Point::new(2, 2);
    println!("points nearest to {center}:");
    for _ in 0..5 {
        if grid.is_empty() {
            break;
        }
        let nearest = grid.pop_closest(&center, Norm::L1);
        println!(
            "  {} (distance: {})",
            nearest.point,
            Norm::L1.distance(&nearest.point, &center)
        );
    }
    println!("{} points left", grid.len());
}
