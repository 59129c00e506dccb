// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_spatial::{Aabb, GridConfig, PointIndex, RegionIndex, UniformGrid};

const HALF_WORLD: f64 = 1000.0;

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
    fn coord(&mut self) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * HALF_WORLD
    }
}

fn world() -> Aabb {
    Aabb::new(Point::ZERO, Vec2::new(HALF_WORLD, HALF_WORLD))
}

fn gen_uniform_points(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.coord(), rng.coord()))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let c = Point::new(rng.coord() * 0.8, rng.coord() * 0.8);
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(c + Vec2::new(dx, dy));
        }
    }
    out
}

/// Short horizontal and vertical wall segments, as boxes.
fn gen_walls(count: usize, max_len: f64) -> Vec<Aabb> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let len = rng.next_f64() * max_len + 1.0;
        let x0 = rng.coord().clamp(-HALF_WORLD, HALF_WORLD - len);
        let y0 = rng.coord().clamp(-HALF_WORLD, HALF_WORLD - len);
        let r = if i % 2 == 0 {
            Rect::new(x0, y0, x0 + len, y0 + 2.0)
        } else {
            Rect::new(x0, y0, x0 + 2.0, y0 + len)
        };
        out.push(Aabb::from_rect(r));
    }
    out
}

fn jitter(points: &[Point], step: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    points
        .iter()
        .map(|p| {
            let dx = (rng.next_f64() - 0.5) * step;
            let dy = (rng.next_f64() - 0.5) * step;
            Point::new(
                (p.x + dx).clamp(-HALF_WORLD, HALF_WORLD),
                (p.y + dy).clamp(-HALF_WORLD, HALF_WORLD),
            )
        })
        .collect()
}

fn filled_point_index(points: &[Point]) -> PointIndex<u32> {
    let mut idx = PointIndex::new(world());
    for (i, p) in points.iter().copied().enumerate() {
        idx.insert(i as u32, p);
    }
    idx
}

fn filled_grid(points: &[Point], cells: usize) -> UniformGrid<u32> {
    let config = GridConfig::new(world(), cells, cells).with_max_results(points.len());
    let mut grid = UniformGrid::new(config);
    for (i, p) in points.iter().copied().enumerate() {
        grid.insert(i as u32, p);
    }
    grid
}

fn bench_point_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_index");
    for &n in &[1_000usize, 10_000] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_uniform_n{}", n), |b| {
            b.iter(|| black_box(filled_point_index(&points).len()));
        });

        let moved = jitter(&points, 8.0);
        group.bench_function(format!("update_jitter_n{}", n), |b| {
            b.iter_batched(
                || filled_point_index(&points),
                |mut idx| {
                    for (i, (old, new)) in points.iter().zip(&moved).enumerate() {
                        idx.update(i as u32, *old, *new);
                    }
                    black_box(idx.len());
                },
                BatchSize::LargeInput,
            );
        });

        let idx = filled_point_index(&points);
        let probes = gen_uniform_points(256);
        group.bench_function(format!("query_r50_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &probes {
                    hits += idx.query(Aabb::from_center_radius(*p, 50.0)).count();
                }
                black_box(hits);
            });
        });
    }

    let clustered = gen_clustered_points(20, 500, 40.0);
    group.throughput(Throughput::Elements(clustered.len() as u64));
    group.bench_function("insert_clustered_20x500", |b| {
        b.iter(|| black_box(filled_point_index(&clustered).len()));
    });
    group.finish();
}

fn bench_region_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_index");
    for &max_len in &[10.0, 200.0] {
        let walls = gen_walls(4_000, max_len);
        group.throughput(Throughput::Elements(walls.len() as u64));
        group.bench_function(format!("insert_walls_len{}", max_len), |b| {
            b.iter(|| {
                let mut idx = RegionIndex::<u32>::new(world());
                for (i, w) in walls.iter().copied().enumerate() {
                    idx.insert(i as u32, w);
                }
                black_box(idx.len());
            });
        });

        let mut idx = RegionIndex::<u32>::new(world());
        for (i, w) in walls.iter().copied().enumerate() {
            idx.insert(i as u32, w);
        }
        let probes = gen_uniform_points(256);
        group.bench_function(format!("query_r30_len{}", max_len), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &probes {
                    hits += idx.query(Aabb::from_center_radius(*p, 30.0)).count();
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_uniform_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform_grid");
    let n = 10_000usize;
    let points = gen_uniform_points(n);
    let moved = jitter(&points, 8.0);
    group.throughput(Throughput::Elements(n as u64));
    for &cells in &[16usize, 64] {
        group.bench_function(format!("insert_n{}_cells{}", n, cells), |b| {
            b.iter(|| black_box(filled_grid(&points, cells).len()));
        });

        group.bench_function(format!("update_jitter_n{}_cells{}", n, cells), |b| {
            b.iter_batched(
                || filled_grid(&points, cells),
                |mut grid| {
                    for (i, (old, new)) in points.iter().zip(&moved).enumerate() {
                        grid.update(i as u32, *old, *new);
                    }
                    black_box(grid.len());
                },
                BatchSize::LargeInput,
            );
        });

        let mut grid = filled_grid(&points, cells);
        let probes = gen_uniform_points(256);
        group.bench_function(format!("query_lazy_r50_cells{}", cells), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &probes {
                    hits += grid.query(*p, 50.0).count();
                }
                black_box(hits);
            });
        });
        group.bench_function(format!("query_buffered_r50_cells{}", cells), |b| {
            b.iter(|| {
                let mut hits = 0;
                for p in &probes {
                    hits += grid.query_buffered(*p, 50.0).len();
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_point_index,
    bench_region_index,
    bench_uniform_grid
);
criterion_main!(benches);
