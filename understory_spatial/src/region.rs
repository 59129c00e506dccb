// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree keyed by an axis-aligned box per entity (line obstacles, walls).

use crate::config::TreeConfig;
use crate::tree::{Placement, QuadTree};
use crate::types::Aabb;

/// Adaptive quadtree over entity boxes.
///
/// There is no per-node count threshold by default: a box sinks to the
/// deepest node that still fully contains it, bounded by the minimum
/// dimension. A box that straddles a split line stays at the coarser node,
/// so queries over such boxes do not get cheaper as the tree deepens.
///
/// Queries report every box that overlaps the area, wherever it is stored.
/// Removal matches both the key and the exact box.
pub type RegionIndex<K> = QuadTree<K, Aabb>;

impl Placement for Aabb {
    const DEFAULT_CONFIG: TreeConfig = TreeConfig::REGIONS;

    #[inline]
    fn fits(&self, bounds: &Aabb) -> bool {
        bounds.contains_aabb(self)
    }

    #[inline]
    fn hits(&self, area: &Aabb) -> bool {
        area.intersects(self)
    }

    #[inline]
    fn matches(&self, stored: &Self) -> bool {
        self == stored
    }
}
