// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree keyed by a single position per entity.

use kurbo::Point;

use crate::config::TreeConfig;
use crate::tree::{Placement, QuadTree};
use crate::types::Aabb;

/// Adaptive quadtree over entity positions.
///
/// Nodes hold up to [`TreeConfig::POINTS`]`.node_capacity` entries before
/// subdividing, and stop subdividing once they shrink to the minimum
/// dimension. Queries report points inside the area (edges inclusive).
pub type PointIndex<K> = QuadTree<K, Point>;

impl Placement for Point {
    const DEFAULT_CONFIG: TreeConfig = TreeConfig::POINTS;

    #[inline]
    fn fits(&self, bounds: &Aabb) -> bool {
        bounds.contains(*self)
    }

    #[inline]
    fn hits(&self, area: &Aabb) -> bool {
        area.contains(*self)
    }

    #[inline]
    fn matches(&self, _stored: &Self) -> bool {
        // The search path already followed `self`; the key decides.
        true
    }
}
