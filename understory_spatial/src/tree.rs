// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive quadtree generic over the stored geometry.
//!
//! Nodes live in a flat arena and refer to their children by index. A node is
//! subdivided at most once, and its children are never freed individually: the
//! whole arena is dropped with the tree.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::TreeConfig;
use crate::error::SpatialError;
use crate::traversal::{Iter, Nodes, Query};
use crate::types::Aabb;

/// How a geometry value is placed in and matched against a [`QuadTree`].
///
/// Implemented for [`kurbo::Point`] (see [`PointIndex`](crate::PointIndex)) and
/// [`Aabb`] (see [`RegionIndex`](crate::RegionIndex)).
pub trait Placement: Copy + PartialEq + Debug {
    /// Configuration used by [`QuadTree::new`].
    const DEFAULT_CONFIG: TreeConfig;

    /// Whether a node with `bounds` may hold this geometry.
    ///
    /// Governs root admission, descent into children, and the search path of
    /// removal.
    fn fits(&self, bounds: &Aabb) -> bool;

    /// Whether this geometry should be reported by a query over `area`.
    fn hits(&self, area: &Aabb) -> bool;

    /// Whether a stored value matches the value a caller supplied for removal.
    fn matches(&self, stored: &Self) -> bool;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const ROOT: Self = Self(0);

    const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, G> {
    pub(crate) bounds: Aabb,
    pub(crate) depth: u32,
    pub(crate) entries: BTreeMap<K, G>,
    // NW, NE, SW, SE
    pub(crate) children: Option<[NodeIdx; 4]>,
}

impl<K, G> Node<K, G> {
    fn new(bounds: Aabb, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            entries: BTreeMap::new(),
            children: None,
        }
    }
}

/// Adaptive quadtree mapping keys to geometry.
///
/// Usually used through the [`PointIndex`](crate::PointIndex) and
/// [`RegionIndex`](crate::RegionIndex) aliases.
///
/// Each key must be resident at most once; inserting a key that is already
/// present elsewhere in the tree is a caller error.
#[derive(Clone)]
pub struct QuadTree<K, G> {
    config: TreeConfig,
    nodes: Vec<Node<K, G>>,
}

impl<K: Ord + Copy, G: Placement> QuadTree<K, G> {
    /// Create an empty tree over `bounds` with the geometry's default config.
    pub fn new(bounds: Aabb) -> Self {
        Self::with_config(bounds, G::DEFAULT_CONFIG)
    }

    /// Create an empty tree over `bounds` with an explicit config.
    ///
    /// # Panics
    ///
    /// If `config.min_dimension` is not strictly positive.
    pub fn with_config(bounds: Aabb, config: TreeConfig) -> Self {
        assert!(
            config.min_dimension > 0.0,
            "min_dimension must be positive to bound subdivision"
        );
        let mut nodes = Vec::new();
        nodes.push(Node::new(bounds, 0));
        Self { config, nodes }
    }

    /// World bounds of the root node.
    pub fn bounds(&self) -> Aabb {
        self.nodes[NodeIdx::ROOT.get()].bounds
    }

    /// Subdivision policy in use.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Insert `key` at `geom`.
    ///
    /// Returns `false` (and leaves the tree untouched) when the root bounds do
    /// not admit `geom`.
    ///
    /// The entry settles at the first node on its way down that has spare
    /// capacity or has reached the size floor. Full nodes subdivide on demand
    /// and hand the entry to the first child (NW, NE, SW, SE) that fits it;
    /// when no child fits, the entry stays at the current node.
    pub fn insert(&mut self, key: K, geom: G) -> bool {
        if !geom.fits(&self.bounds()) {
            return false;
        }
        let mut at = NodeIdx::ROOT;
        loop {
            let node = &self.nodes[at.get()];
            if node.entries.len() < self.config.node_capacity || self.config.at_floor(&node.bounds)
            {
                break;
            }
            let existing = node.children;
            let children = match existing {
                Some(children) => children,
                None => self.subdivide(at),
            };
            let next = children
                .into_iter()
                .find(|c| geom.fits(&self.nodes[c.get()].bounds));
            match next {
                Some(child) => at = child,
                None => {
                    log::debug!(
                        "no quadrant accepts {geom:?}; retaining at depth {}",
                        self.nodes[at.get()].depth
                    );
                    break;
                }
            }
        }
        self.nodes[at.get()].entries.insert(key, geom);
        true
    }

    /// Remove `key`, searching along the nodes that admit `geom`.
    ///
    /// Returns `false` when `geom` is outside the root or the key is not found
    /// on that path.
    pub fn remove(&mut self, key: K, geom: G) -> bool {
        match self.locate(key, &geom) {
            Some(at) => self.nodes[at.get()].entries.remove(&key).is_some(),
            None => false,
        }
    }

    /// Whether `key` is stored at `geom`.
    pub fn contains(&self, key: K, geom: G) -> bool {
        self.locate(key, &geom).is_some()
    }

    /// Move `key` from `old` to `new`.
    ///
    /// Equal `old` and `new` leave the tree untouched once the key is known to
    /// be present. Otherwise `new` is checked against the root before anything
    /// is removed, so an error never leaves the key detached.
    pub fn try_update(&mut self, key: K, old: G, new: G) -> Result<(), SpatialError> {
        if old == new {
            return if self.contains(key, old) {
                Ok(())
            } else {
                Err(SpatialError::NotFound)
            };
        }
        if !new.fits(&self.bounds()) {
            return Err(SpatialError::OutOfBounds);
        }
        if !self.remove(key, old) {
            return Err(SpatialError::NotFound);
        }
        let inserted = self.insert(key, new);
        debug_assert!(inserted, "new geometry was admitted by the root");
        Ok(())
    }

    /// Move `key` from `old` to `new`.
    ///
    /// # Panics
    ///
    /// When the key is not stored at `old` or `new` lies outside the root.
    /// Either means the caller's record of the entity's last position is wrong.
    pub fn update(&mut self, key: K, old: G, new: G) {
        if let Err(err) = self.try_update(key, old, new) {
            log::error!("quadtree update from {old:?} to {new:?} failed: {err}");
            panic!("quadtree update failed: {err}");
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|n| n.entries.len()).sum()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.entries.is_empty())
    }

    /// Drop every entry. Subdivisions are kept.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.entries.clear();
        }
    }

    /// Keys whose geometry is hit by `area`.
    ///
    /// Subtrees whose bounds miss `area` are skipped. Order is unspecified.
    pub fn query(&self, area: Aabb) -> Query<'_, K, G> {
        Query::new(self, area)
    }

    /// Every stored `(key, geometry)` pair, each exactly once.
    pub fn iter(&self) -> Iter<'_, K, G> {
        Iter::new(self)
    }

    /// Structural view of every node, for debug drawing and diagnostics.
    pub fn nodes(&self) -> Nodes<'_, K, G> {
        Nodes::new(&self.nodes)
    }

    fn locate(&self, key: K, geom: &G) -> Option<NodeIdx> {
        if !geom.fits(&self.bounds()) {
            return None;
        }
        let mut stack = alloc::vec![NodeIdx::ROOT];
        while let Some(at) = stack.pop() {
            let node = &self.nodes[at.get()];
            if node
                .entries
                .get(&key)
                .is_some_and(|stored| geom.matches(stored))
            {
                return Some(at);
            }
            if let Some(children) = node.children {
                // Reversed so NW is visited first.
                for c in children.into_iter().rev() {
                    if geom.fits(&self.nodes[c.get()].bounds) {
                        stack.push(c);
                    }
                }
            }
        }
        None
    }

    fn subdivide(&mut self, at: NodeIdx) -> [NodeIdx; 4] {
        let parent = &self.nodes[at.get()];
        debug_assert!(parent.children.is_none(), "node is subdivided once");
        let depth = parent.depth + 1;
        let quads = parent.bounds.quadrants();
        log::trace!("subdividing {:?} at depth {}", parent.bounds, parent.depth);
        let base = self.nodes.len();
        self.nodes.extend(quads.into_iter().map(|q| Node::new(q, depth)));
        let children = [0, 1, 2, 3].map(|i| NodeIdx::new(base + i));
        self.nodes[at.get()].children = Some(children);
        children
    }

    pub(crate) fn node(&self, at: NodeIdx) -> &Node<K, G> {
        &self.nodes[at.get()]
    }
}

impl<'a, K: Ord + Copy, G: Placement> IntoIterator for &'a QuadTree<K, G> {
    type Item = (K, G);
    type IntoIter = Iter<'a, K, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, G> Debug for QuadTree<K, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries: usize = self.nodes.iter().map(|n| n.entries.len()).sum();
        let leaves = self.nodes.iter().filter(|n| n.children.is_none()).count();
        let depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        f.debug_struct("QuadTree")
            .field("bounds", &self.nodes[NodeIdx::ROOT.get()].bounds)
            .field("config", &self.config)
            .field("arena_nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("depth", &depth)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}
