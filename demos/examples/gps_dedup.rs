// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GPS track deduplication.
//!
//! Feed a noisy track point by point and keep a point only if no kept point
//! lies within a distance threshold; otherwise reuse the nearby one.
//!
//! Run:
//! - `cargo run -p understory_kdtree_demos --example gps_dedup`

use understory_kdtree::{KdTreeF64, Norm, Point};

/// Rough length of one degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug)]
struct Waypoint {
    id: usize,
}

fn main() {
    let raw_track = [
        (37.7749, -122.4194),
        (37.7750, -122.4195),
        (37.7751, -122.4194),
        (37.7849, -122.4094),
        (37.7850, -122.4095),
        (37.7949, -122.3994),
        (37.7950, -122.3995),
        (37.7949, -122.3994),
    ];
    let threshold_km = 0.1;
    let threshold_deg = threshold_km / KM_PER_DEGREE;

    let mut kept: KdTreeF64<Waypoint> = KdTreeF64::new();
    let mut track = Vec::new();

    for (i, &(lat, lon)) in raw_track.iter().enumerate() {
        let here = Point::new(lat, lon);
        if !kept.is_empty() {
            let closest = kept.find_closest(&here, Norm::L2);
            let dist_deg = closest.point.distance(&here);
            if dist_deg < threshold_deg {
                println!(
                    "point {i}: {here} reuses waypoint {} ({:.1} m away)",
                    closest.payload.id,
                    dist_deg * KM_PER_DEGREE * 1000.0
                );
                track.push(closest.payload.id);
                continue;
            }
            println!(
                "point {i}: {here} added ({:.2} km from nearest)",
                dist_deg * KM_PER_DEGREE
            );
        } else {
            println!("point {i}: {here} added (first point)");
        }
        let id = kept.len();
        kept.insert(here, Waypoint { id });
        track.push(id);
    }

    println!(
        "\ntrack simplified: {} points -> {} unique waypoints",
        raw_track.len(),
        kept.len()
    );
    println!("waypoint sequence: {track:?}");
}
