// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minesweeper reveal queue.
//!
//! A spatial work queue that always opens the pending cell closest to the one
//! opened last, which reveals the board in a flood-fill pattern. Cells with no
//! neighboring mines push their unopened neighbors back onto the queue.
//!
//! Run:
//! - `cargo run -p understory_kdtree_demos --example minesweeper_queue`

use std::collections::HashSet;

use understory_kdtree::{KdTreeI32, Norm, Point, Pointi};

const WIDTH: i32 = 10;
const HEIGHT: i32 = 10;
const MINES: [(i32, i32); 6] = [(0, 9), (1, 7), (7, 1), (8, 8), (9, 2), (3, 8)];

fn neighbors(p: Pointi) -> impl Iterator<Item = Pointi> {
    (-1..=1)
        .flat_map(move |dx| (-1..=1).map(move |dy| Point::new(p.x + dx, p.y + dy)))
        .filter(move |n| *n != p && (0..WIDTH).contains(&n.x) && (0..HEIGHT).contains(&n.y))
}

fn main() {
    let mines: HashSet<Pointi> = MINES.iter().map(|&m| m.into()).collect();
    let adjacent = |p: Pointi| neighbors(p).filter(|n| mines.contains(n)).count();

    let mut pending = KdTreeI32::<u32>::default();
    let mut opened = HashSet::new();

    let mut last = Point::new(5, 5);
    println!("initial click: {last}");
    pending.insert(last, 0);

    let mut order = Vec::new();
    while !pending.is_empty() {
        let cell = pending.pop_closest(&last, Norm::L2);
        last = cell.point;
        if !opened.insert(last) {
            continue;
        }
        order.push(last);
        if adjacent(last) == 0 {
            for n in neighbors(last) {
                if !opened.contains(&n) && !mines.contains(&n) {
                    // Generation counter as payload; a re-queued cell keeps its first one.
                    pending.insert(n, cell.payload + 1);
                }
            }
        }
    }

    let shown: Vec<String> = order.iter().take(12).map(ToString::to_string).collect();
    println!("reveal order: {} -> ...", shown.join(" -> "));
    println!("opened {} of {} safe cells", order.len(), WIDTH * HEIGHT - MINES.len() as i32);

    for y in 0..HEIGHT {
        let row: String = (0..WIDTH)
            .map(|x| {
                let p = Point::new(x, y);
                if mines.contains(&p) {
                    '*'
                } else if opened.contains(&p) {
                    match adjacent(p) {
                        0 => '.',
                        n => char::from_digit(n as u32, 10).unwrap_or('?'),
                    }
                } else {
                    '#'
                }
            })
            .collect();
        println!("  {row}");
    }
}
