// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use understory_spatial::{Aabb, PointIndex};

use rstar::{AABB, RTree};

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
}

fn gen_points(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            Point::new(
                rng.next_f64() * 2000.0 - 1000.0,
                rng.next_f64() * 2000.0 - 1000.0,
            )
        })
        .collect()
}

fn bench_point_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_external_compare");
    let world = Aabb::new(Point::ZERO, Vec2::new(1000.0, 1000.0));
    let area = Aabb::from_center_radius(Point::new(120.0, -80.0), 200.0);
    for &n in &[4_096usize, 16_384] {
        let points = gen_points(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("understory_build_query_n{}", n), |b| {
            b.iter(|| {
                let mut idx = PointIndex::<u32>::new(world);
                for (i, p) in points.iter().copied().enumerate() {
                    idx.insert(i as u32, p);
                }
                black_box(idx.query(area).count());
            });
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter(|| {
                let mut tree = RTree::new();
                for p in &points {
                    tree.insert([p.x, p.y]);
                }
                let envelope = AABB::from_corners(
                    [area.min_x(), area.min_y()],
                    [area.max_x(), area.max_y()],
                );
                black_box(tree.locate_in_envelope(&envelope).count());
            });
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                |coords| {
                    let tree = RTree::bulk_load(coords);
                    let envelope = AABB::from_corners(
                        [area.min_x(), area.min_y()],
                        [area.max_x(), area.max_y()],
                    );
                    black_box(tree.locate_in_envelope(&envelope).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_point_external_compare);
criterion_main!(benches);
