// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Obstacle lookup with a region tree.
//!
//! Walls are line segments stored by their bounding boxes. An agent probes
//! the box around its next move, then runs the exact segment test only on
//! the walls the tree returns.
//!
//! Run:
//! - `cargo run -p understory_demos --example obstacles_region`

use kurbo::{Line, ParamCurveNearest, Point, Rect, Vec2};
use understory_spatial::{Aabb, RegionIndex, TreeConfig};

fn segment_box(line: Line) -> Aabb {
    Aabb::from_corners(line.p0, line.p1)
}

fn main() {
    env_logger::init();

    let bounds = Aabb::new(Point::ZERO, Vec2::new(512.0, 512.0));
    // Hold two walls per node before descending.
    let mut walls: RegionIndex<u16> =
        RegionIndex::with_config(bounds, TreeConfig::REGIONS.with_node_capacity(2));

    let segments = [
        Line::new((-400.0, -300.0), (-100.0, -300.0)),
        Line::new((-100.0, -300.0), (-100.0, 50.0)),
        Line::new((50.0, 100.0), (450.0, 100.0)),
        Line::new((200.0, -450.0), (200.0, -50.0)),
        // Crosses both root split lines.
        Line::new((-30.0, -30.0), (30.0, 30.0)),
    ];
    for (id, seg) in (0_u16..).zip(segments) {
        assert!(walls.insert(id, segment_box(seg)), "wall {id} outside the map");
    }
    println!("{} walls in {} nodes", walls.len(), walls.nodes().len());

    let agent = Point::new(-150.0, -200.0);
    let step = Vec2::new(80.0, 0.0);
    let reach = 4.0;
    let sweep = Rect::from_points(agent, agent + step).inflate(reach, reach);

    let mut blocked = None;
    for id in walls.query(Aabb::from_rect(sweep)) {
        let seg = segments[usize::from(id)];
        let path = Line::new(agent, agent + step);
        // Closest approach between the path and the wall, sampled at the wall's ends
        // and the path's ends.
        let gap = [
            path.nearest(seg.p0, 1e-9).distance_sq,
            path.nearest(seg.p1, 1e-9).distance_sq,
            seg.nearest(path.p0, 1e-9).distance_sq,
            seg.nearest(path.p1, 1e-9).distance_sq,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
        .sqrt();
        let crosses = path.crossing_point(seg).is_some();
        log::debug!("candidate wall {id}: gap {gap:.2}, crosses {crosses}");
        if crosses || gap <= reach {
            blocked = Some(id);
        }
    }
    match blocked {
        Some(id) => println!("move from {agent:?} by {step:?} is blocked by wall {id}"),
        None => println!("move from {agent:?} by {step:?} is clear"),
    }
    assert_eq!(blocked, Some(1));

    // Walls can move; the caller passes the box it was stored under.
    let old = segment_box(segments[1]);
    let moved = segment_box(Line::new((-300.0, -300.0), (-300.0, 50.0)));
    walls.update(1, old, moved);
    assert_eq!(walls.query(Aabb::from_rect(sweep)).count(), 0);
}
