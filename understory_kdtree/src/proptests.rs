// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::*;

use alloc::vec::Vec;
use proptest::prelude::*;
use std::collections::BTreeMap;

const NORMS: [Norm; 3] = [Norm::L1, Norm::L2, Norm::Linf];

#[derive(Clone, Debug)]
enum Op {
    Insert(Pointi, u32),
    Set(Pointi, u32),
    Remove(Pointi),
    Find(Pointi),
    Pop(Pointi, Norm),
    Rebalance,
}

fn point_strategy() -> impl Strategy<Value = Pointi> + Clone {
    // A small grid so inserts collide and removals hit.
    (-24_i32..24, -24_i32..24).prop_map(Point::from)
}

fn norm_strategy() -> impl Strategy<Value = Norm> {
    prop_oneof![Just(Norm::L1), Just(Norm::L2), Just(Norm::Linf)]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let point = point_strategy();
    let op = prop_oneof![
        40 => (point.clone(), any::<u32>()).prop_map(|(p, v)| Op::Insert(p, v)),
        15 => (point.clone(), any::<u32>()).prop_map(|(p, v)| Op::Set(p, v)),
        25 => point.clone().prop_map(Op::Remove),
        10 => point.clone().prop_map(Op::Find),
        9 => (point, norm_strategy()).prop_map(|(p, n)| Op::Pop(p, n)),
        1 => Just(Op::Rebalance),
    ];
    prop::collection::vec(op, 0..=600)
}

fn brute_min<T: Scalar, P>(values: &[Value<T, P>], query: &Point<T>, norm: Norm) -> T::Acc {
    let mut best = norm.distance(&values[0].point, query);
    for v in &values[1..] {
        let d = norm.distance(&v.point, query);
        if d < best {
            best = d;
        }
    }
    best
}

fn sorted_contents(tree: &KdTree<i32, u32>) -> Vec<(Pointi, u32)> {
    let mut out: Vec<_> = tree.iter().map(|v| (v.point, v.payload)).collect();
    out.sort();
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 20_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_matches_map_model(ops in ops_strategy()) {
        let mut t: KdTree<i32, u32> = KdTree::new();
        let mut m: BTreeMap<Pointi, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(p, v) => {
                    let inserted = t.insert(p, v);
                    let fresh = !m.contains_key(&p);
                    if fresh {
                        m.insert(p, v);
                    }
                    prop_assert_eq!(inserted, fresh);
                }
                Op::Set(p, v) => {
                    prop_assert_eq!(t.set(p, v), m.insert(p, v));
                }
                Op::Remove(p) => {
                    let got = t.remove(&p).map(|v| (v.point, v.payload));
                    let expected = m.remove(&p).map(|v| (p, v));
                    prop_assert_eq!(got, expected);
                }
                Op::Find(p) => {
                    prop_assert_eq!(t.find(&p).map(|v| v.payload), m.get(&p).copied());
                    prop_assert_eq!(t.exists(&p), m.contains_key(&p));
                }
                Op::Pop(q, norm) => {
                    if m.is_empty() {
                        prop_assert!(t.is_empty());
                        continue;
                    }
                    let best = m.keys().map(|p| norm.distance(p, &q)).min();
                    let popped = t.pop_closest(&q, norm);
                    prop_assert_eq!(Some(norm.distance(&popped.point, &q)), best);
                    prop_assert_eq!(m.remove(&popped.point), Some(popped.payload));
                }
                Op::Rebalance => t.rebalance(),
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.check_invariants(), Ok(()));
        }

        let expected: Vec<(Pointi, u32)> = m.into_iter().collect();
        prop_assert_eq!(sorted_contents(&t), expected);
    }

    #[test]
    fn prop_self_find(points in prop::collection::btree_set(point_strategy(), 1..200)) {
        let t: KdTree<i32, usize> = points
            .iter()
            .enumerate()
            .map(|(i, p)| Value::new(*p, i))
            .collect();
        for v in &t {
            for norm in NORMS {
                prop_assert_eq!(t.find_closest(&v.point, norm), v);
            }
        }
    }

    #[test]
    fn prop_nearest_matches_brute_force(
        coords in prop::collection::vec((-1.0e3_f64..1.0e3, -1.0e3_f64..1.0e3), 1..300),
        query in (-1.2e3_f64..1.2e3, -1.2e3_f64..1.2e3),
    ) {
        let mut t = KdTree::new();
        for (i, c) in coords.into_iter().enumerate() {
            t.insert(Point::from(c), i);
        }
        let values: Vec<_> = t.iter().cloned().collect();
        let query = Point::from(query);
        for norm in NORMS {
            let got = t.find_closest(&query, norm);
            prop_assert_eq!(norm.distance(&got.point, &query), brute_min(&values, &query, norm));
        }
    }

    #[test]
    fn prop_bulk_and_sequential_agree(
        entries in prop::collection::vec((point_strategy(), any::<u32>()), 0..400),
    ) {
        let bulk: KdTree<i32, u32> = entries
            .iter()
            .map(|&(p, v)| Value::new(p, v))
            .collect();
        let mut seq = KdTree::new();
        for &(p, v) in &entries {
            seq.insert(p, v);
        }
        prop_assert_eq!(bulk.check_invariants(), Ok(()));
        prop_assert_eq!(seq.check_invariants(), Ok(()));
        prop_assert_eq!(bulk.len(), seq.len());
        prop_assert_eq!(sorted_contents(&bulk), sorted_contents(&seq));
    }

    #[test]
    fn prop_round_trip(points in prop::collection::btree_set(point_strategy(), 0..300)) {
        let mut t = KdTree::new();
        for p in &points {
            prop_assert!(t.insert(*p, 0_u32));
        }
        prop_assert_eq!(t.len(), points.len());
        let mut seen: Vec<Pointi> = t.into_iter().map(|v| v.point).collect();
        seen.sort();
        let expected: Vec<Pointi> = points.into_iter().collect();
        prop_assert_eq!(seen, expected);
    }
}
