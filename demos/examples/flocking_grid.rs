// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flocking with a uniform grid.
//!
//! A few hundred boids wander a toroidal world. Each step asks the grid for
//! candidate neighbors, filters them by exact distance, and applies
//! separation, alignment, and cohesion.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example flocking_grid`

use kurbo::{Point, Rect, Vec2};
use understory_spatial::{Aabb, GridConfig, UniformGrid};

const WORLD: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);
const BOIDS: usize = 300;
const STEPS: usize = 200;
const VIEW_RADIUS: f64 = 40.0;
const MAX_SPEED: f64 = 3.0;

#[derive(Clone, Copy, Debug)]
struct Boid {
    pos: Point,
    vel: Vec2,
}

struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn wrap(p: Point) -> Point {
    Point::new(
        p.x.rem_euclid(WORLD.width()),
        p.y.rem_euclid(WORLD.height()),
    )
}

fn steer(me: usize, boids: &[Boid], neighbors: &[usize]) -> Vec2 {
    let b = boids[me];
    let mut separation = Vec2::ZERO;
    let mut heading = Vec2::ZERO;
    let mut center = Vec2::ZERO;
    let mut count = 0.0;
    for &other in neighbors {
        if other == me {
            continue;
        }
        let o = boids[other];
        let offset = b.pos - o.pos;
        let d = offset.hypot();
        if d > VIEW_RADIUS || d == 0.0 {
            continue;
        }
        separation += offset / (d * d);
        heading += o.vel;
        center += o.pos.to_vec2();
        count += 1.0;
    }
    if count == 0.0 {
        return Vec2::ZERO;
    }
    let alignment = heading / count - b.vel;
    let cohesion = center / count - b.pos.to_vec2();
    separation * 30.0 + alignment * 0.05 + cohesion * 0.005
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let world = Aabb::from_rect(WORLD);
    // Cells no smaller than the view radius keep a query within a 3x3 block.
    let config = GridConfig::new(world, 20, 15).with_max_results(BOIDS);
    let mut grid = UniformGrid::new(config);

    let mut rng = Rng(0x0B01_D5EE_D000_0001);
    let mut boids: Vec<Boid> = (0..BOIDS)
        .map(|_| Boid {
            pos: Point::new(
                rng.next_f64() * WORLD.width(),
                rng.next_f64() * WORLD.height(),
            ),
            vel: Vec2::new(rng.next_f64() - 0.5, rng.next_f64() - 0.5) * 2.0,
        })
        .collect();
    for (i, b) in boids.iter().enumerate() {
        grid.insert(i, b.pos);
    }
    log::info!("{} boids in {} cells", grid.len(), grid.cell_count());

    let mut neighbors = Vec::new();
    for step in 0..STEPS {
        let mut candidates = 0;
        let mut steering = Vec::with_capacity(BOIDS);
        for (i, b) in boids.iter().enumerate() {
            neighbors.clear();
            neighbors.extend(grid.query(b.pos, VIEW_RADIUS));
            candidates += neighbors.len();
            steering.push(steer(i, &boids, &neighbors));
        }
        for (i, (b, force)) in boids.iter_mut().zip(steering).enumerate() {
            let old = b.pos;
            b.vel += force;
            if b.vel.hypot() > MAX_SPEED {
                b.vel = b.vel.normalize() * MAX_SPEED;
            }
            b.pos = wrap(b.pos + b.vel);
            grid.update(i, old, b.pos);
        }
        if step % 50 == 0 {
            log::debug!(
                "step {step}: {:.1} candidates per boid",
                candidates as f64 / BOIDS as f64
            );
        }
    }

    // The single-buffer variant: one query live at a time.
    let probe = boids[0].pos;
    let near = grid.query_buffered(probe, VIEW_RADIUS).len();
    println!("boid 0 at {probe:?} sees {near} candidates");
    assert_eq!(grid.len(), BOIDS);
}
