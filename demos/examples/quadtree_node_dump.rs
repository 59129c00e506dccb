// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point index basics and a debug-draw style node dump.
//!
//! Inserts a cluster and a scatter of points, prints every node's bounds the way a
//! debug overlay would draw them, then moves and removes a few entities.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example quadtree_node_dump`

use kurbo::{Point, Vec2};
use understory_spatial::{Aabb, PointIndex};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let world = Aabb::new(Point::ZERO, Vec2::new(256.0, 256.0));
    let mut idx: PointIndex<u32> = PointIndex::new(world);

    // A tight cluster near (100, 100) and a coarse ring around the origin.
    let mut positions = Vec::new();
    for i in 0..12 {
        let t = f64::from(i);
        positions.push(Point::new(100.0 + t.sin() * 6.0, 100.0 + t.cos() * 6.0));
    }
    for i in 0..8 {
        let a = f64::from(i) * core::f64::consts::FRAC_PI_4;
        positions.push(Point::new(a.cos() * 200.0, a.sin() * 200.0));
    }
    for (key, p) in (0_u32..).zip(&positions) {
        assert!(idx.insert(key, *p), "{p:?} is inside the world");
    }
    log::info!("{idx:?}");

    for n in idx.nodes() {
        let r = n.bounds.to_rect();
        let indent = "  ".repeat(n.depth as usize);
        let kind = if n.is_leaf { "leaf" } else { "node" };
        println!(
            "{indent}{kind} [{:.1}, {:.1}] - [{:.1}, {:.1}] holds {}",
            r.x0, r.y0, r.x1, r.y1, n.entries
        );
    }

    // Move one cluster member across the world, and drop one ring member.
    let from = positions[3];
    let to = Point::new(-180.0, 40.0);
    idx.update(3, from, to);
    positions[3] = to;
    assert!(idx.remove(15, positions[15]));

    let probe = Aabb::from_center_radius(Point::new(100.0, 100.0), 10.0);
    let mut cluster: Vec<_> = idx.query(probe).collect();
    cluster.sort_unstable();
    println!("around (100, 100): {cluster:?}");
    assert_eq!(cluster.len(), 11);

    println!("{} entries, {} nodes", idx.len(), idx.nodes().len());
    idx.clear();
    println!("after clear: {} entries, {} nodes kept", idx.len(), idx.nodes().len());
}
