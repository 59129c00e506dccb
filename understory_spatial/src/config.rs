// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration for trees and grids.

use crate::types::Aabb;

/// Subdivision policy for [`QuadTree`](crate::QuadTree).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// A node keeps entries locally while it holds fewer than this many.
    ///
    /// Zero means "never keep by count": entries always try to descend, and
    /// only the size floor (or a straddling box) stops them.
    pub node_capacity: usize,
    /// Nodes whose width or height is at or below this length never subdivide.
    ///
    /// This bounds the depth of the tree and guarantees termination for
    /// coincident points.
    pub min_dimension: f64,
}

impl TreeConfig {
    /// Defaults for point trees: four entries per node, 8 unit floor.
    pub const POINTS: Self = Self {
        node_capacity: 4,
        min_dimension: 8.0,
    };

    /// Defaults for region trees: no count threshold, 8 unit floor.
    pub const REGIONS: Self = Self {
        node_capacity: 0,
        min_dimension: 8.0,
    };

    /// Replace the node capacity.
    #[must_use]
    pub const fn with_node_capacity(mut self, node_capacity: usize) -> Self {
        self.node_capacity = node_capacity;
        self
    }

    /// Replace the minimum dimension.
    #[must_use]
    pub const fn with_min_dimension(mut self, min_dimension: f64) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    /// Whether a node with these bounds has reached the size floor.
    pub(crate) fn at_floor(&self, bounds: &Aabb) -> bool {
        bounds.width() <= self.min_dimension || bounds.height() <= self.min_dimension
    }
}

/// Layout of a [`UniformGrid`](crate::UniformGrid).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// World rectangle covered by the grid.
    pub world: Aabb,
    /// Number of columns.
    pub cells_x: usize,
    /// Number of rows.
    pub cells_y: usize,
    /// Size of the buffer used by buffered queries.
    pub max_results: usize,
}

impl GridConfig {
    /// Default `max_results` when none is given.
    pub const DEFAULT_MAX_RESULTS: usize = 1024;

    /// Create a layout of `cells_x` by `cells_y` cells over `world`.
    pub const fn new(world: Aabb, cells_x: usize, cells_y: usize) -> Self {
        Self {
            world,
            cells_x,
            cells_y,
            max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }

    /// Replace the buffered query capacity.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}
