// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-resolution bucket grid for near-uniform entity density.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::ops::RangeInclusive;

use kurbo::{Point, Vec2};

use crate::config::GridConfig;
use crate::error::SpatialError;
use crate::types::Aabb;

type CellSpan = (RangeInclusive<usize>, RangeInclusive<usize>);

/// Uniform grid of key buckets.
///
/// The world rectangle is cut into `cells_x * cells_y` equal cells addressed
/// row-major. Every operation touches a constant number of cells, except range
/// queries which scan the cells under the query square.
///
/// Positions are expected inside the world rectangle with the upper edges
/// open. Positions outside it are not rejected: they are clamped onto the
/// nearest edge cell, the same way on insert and on removal.
pub struct UniformGrid<K> {
    config: GridConfig,
    cell_w: f64,
    cell_h: f64,
    buckets: Vec<Vec<K>>,
    results: Vec<K>,
}

impl<K: Copy + PartialEq> UniformGrid<K> {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// If either cell count is zero or the world has no area.
    pub fn new(config: GridConfig) -> Self {
        assert!(
            config.cells_x > 0 && config.cells_y > 0,
            "cell counts must be positive"
        );
        assert!(
            config.world.width() > 0.0 && config.world.height() > 0.0,
            "world must have a positive area"
        );
        let cells = config.cells_x * config.cells_y;
        let (cell_w, cell_h) = (
            config.world.width() / config.cells_x as f64,
            config.world.height() / config.cells_y as f64,
        );
        log::debug!("uniform grid: {cells} cells of {cell_w}x{cell_h}");
        let mut buckets = Vec::with_capacity(cells);
        buckets.resize_with(cells, Vec::new);
        Self {
            config,
            cell_w,
            cell_h,
            buckets,
            results: Vec::with_capacity(config.max_results),
        }
    }

    /// Layout the grid was built with.
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// World rectangle covered by the grid.
    pub fn world(&self) -> Aabb {
        self.config.world
    }

    /// Capacity of the buffer used by [`query_buffered`](Self::query_buffered).
    pub fn max_results(&self) -> usize {
        self.config.max_results
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    /// Flat row-major index of the cell holding `pos`.
    pub fn cell_index(&self, pos: Point) -> usize {
        let (col, row) = self.cell_of(pos);
        row * self.config.cells_x + col
    }

    /// Bounds of the cell at `index`, or `None` past the last cell.
    pub fn cell_bounds(&self, index: usize) -> Option<Aabb> {
        if index >= self.buckets.len() {
            return None;
        }
        let col = index % self.config.cells_x;
        let row = index / self.config.cells_x;
        let center = Point::new(
            self.config.world.min_x() + (col as f64 + 0.5) * self.cell_w,
            self.config.world.min_y() + (row as f64 + 0.5) * self.cell_h,
        );
        Some(Aabb::new(center, Vec2::new(self.cell_w * 0.5, self.cell_h * 0.5)))
    }

    /// Keys currently bucketed in the cell at `index`.
    pub fn cell(&self, index: usize) -> &[K] {
        match self.buckets.get(index) {
            Some(bucket) => bucket,
            None => &[],
        }
    }

    /// Add `key` to the cell holding `pos`.
    pub fn insert(&mut self, key: K, pos: Point) {
        let i = self.cell_index(pos);
        self.buckets[i].push(key);
    }

    /// Remove `key` from the cell holding `pos`. Returns whether it was there.
    pub fn remove(&mut self, key: K, pos: Point) -> bool {
        let i = self.cell_index(pos);
        let bucket = &mut self.buckets[i];
        match bucket.iter().position(|k| *k == key) {
            Some(at) => {
                bucket.swap_remove(at);
                true
            }
            None => false,
        }
    }

    /// Move `key` from `old` to `new`. Nothing happens when both share a cell.
    ///
    /// # Panics
    ///
    /// When the cell of `old` does not hold `key`.
    pub fn update(&mut self, key: K, old: Point, new: Point) {
        let from = self.cell_index(old);
        let to = self.cell_index(new);
        if from == to {
            return;
        }
        if !self.remove(key, old) {
            log::error!("uniform grid update from {old:?} to {new:?}: key not in cell {from}");
            panic!("uniform grid update failed: {}", SpatialError::NotFound);
        }
        self.buckets[to].push(key);
    }

    /// Number of bucketed keys.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Empty every bucket.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Keys in every cell touched by the square `center ± radius`.
    ///
    /// The square is clamped to the world; a negative radius touches no cells.
    /// Keys are not filtered by distance; callers check the exact radius
    /// themselves. The iterator borrows the grid, so any number of queries may
    /// be alive at once.
    pub fn query(&self, center: Point, radius: f64) -> GridQuery<'_, K> {
        GridQuery::new(self, self.cell_span(center, radius))
    }

    /// Like [`query`](Self::query), but gathers the keys into the grid's
    /// preallocated result buffer and hands out a slice of it.
    ///
    /// The slice borrows the grid mutably, so only one buffered query can be
    /// alive at a time and the grid cannot change while it is read.
    ///
    /// # Panics
    ///
    /// If more than [`max_results`](Self::max_results) keys are gathered.
    pub fn query_buffered(&mut self, center: Point, radius: f64) -> &[K] {
        match self.try_query_buffered(center, radius) {
            Ok(keys) => keys,
            Err(err) => panic!("uniform grid query failed: {err}"),
        }
    }

    /// Fallible form of [`query_buffered`](Self::query_buffered).
    ///
    /// On overflow the buffer is left empty and
    /// [`SpatialError::CapacityExceeded`] is returned.
    pub fn try_query_buffered(
        &mut self,
        center: Point,
        radius: f64,
    ) -> Result<&[K], SpatialError> {
        let capacity = self.config.max_results;
        self.results.clear();
        let Some((cols, rows)) = self.cell_span(center, radius) else {
            return Ok(self.results.as_slice());
        };
        for row in rows {
            let start = row * self.config.cells_x;
            for bucket in &self.buckets[start + cols.start()..=start + cols.end()] {
                if self.results.len() + bucket.len() > capacity {
                    self.results.clear();
                    return Err(SpatialError::CapacityExceeded { capacity });
                }
                self.results.extend_from_slice(bucket);
            }
        }
        Ok(self.results.as_slice())
    }

    fn cell_of(&self, pos: Point) -> (usize, usize) {
        let world = &self.config.world;
        (
            Self::axis_cell(pos.x - world.min_x(), self.cell_w, self.config.cells_x),
            Self::axis_cell(pos.y - world.min_y(), self.cell_h, self.config.cells_y),
        )
    }

    #[inline]
    fn axis_cell(offset: f64, cell: f64, count: usize) -> usize {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Truncation floors non-negative offsets; negative ones saturate to 0."
        )]
        let i = (offset / cell) as usize;
        i.min(count - 1)
    }

    /// Column and row ranges under the query square, or `None` when it is empty.
    fn cell_span(&self, center: Point, radius: f64) -> Option<CellSpan> {
        if radius < 0.0 {
            return None;
        }
        let (min_col, min_row) = self.cell_of(center - Vec2::new(radius, radius));
        let (max_col, max_row) = self.cell_of(center + Vec2::new(radius, radius));
        let (cols, rows) = (min_col..=max_col, min_row..=max_row);
        if cols.is_empty() || rows.is_empty() {
            return None;
        }
        Some((cols, rows))
    }
}

impl<K> Debug for UniformGrid<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive: usize = self.buckets.iter().map(Vec::len).sum();
        let occupied = self.buckets.iter().filter(|b| !b.is_empty()).count();
        f.debug_struct("UniformGrid")
            .field("config", &self.config)
            .field("cell_w", &self.cell_w)
            .field("cell_h", &self.cell_h)
            .field("alive", &alive)
            .field("occupied_cells", &occupied)
            .finish_non_exhaustive()
    }
}

/// Lazy iterator over the keys of a rectangular block of cells.
///
/// Returned by [`UniformGrid::query`].
pub struct GridQuery<'a, K> {
    grid: &'a UniformGrid<K>,
    span: Option<CellSpan>,
    row_cells: core::slice::Iter<'a, Vec<K>>,
    bucket: core::slice::Iter<'a, K>,
}

impl<'a, K> GridQuery<'a, K> {
    fn new(grid: &'a UniformGrid<K>, span: Option<CellSpan>) -> Self {
        Self {
            grid,
            span,
            row_cells: core::slice::Iter::default(),
            bucket: core::slice::Iter::default(),
        }
    }
}

impl<K: Copy> Iterator for GridQuery<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.bucket.next() {
                return Some(*k);
            }
            if let Some(bucket) = self.row_cells.next() {
                self.bucket = bucket.iter();
                continue;
            }
            let grid = self.grid;
            let (cols, rows) = self.span.as_mut()?;
            let row = rows.next()?;
            let start = row * grid.config.cells_x;
            self.row_cells = grid.buckets[start + cols.start()..=start + cols.end()].iter();
        }
    }
}

impl<K: Copy> FusedIterator for GridQuery<'_, K> {}

impl<K> Debug for GridQuery<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridQuery")
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}
