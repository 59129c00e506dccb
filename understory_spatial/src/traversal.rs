// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! External iteration over a [`QuadTree`].
//!
//! All iterators walk the arena depth-first: a node's own entries are drained
//! before its children (NW, NE, SW, SE) are entered. They borrow the tree
//! immutably, so the tree cannot change underneath a live iterator.

use alloc::collections::btree_map;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::tree::{Node, NodeIdx, Placement, QuadTree};
use crate::types::Aabb;

/// Depth-first cursor shared by [`Iter`] and [`Query`].
///
/// With an `area`, subtrees whose bounds miss it are never entered.
struct Walk<'a, K, G> {
    tree: &'a QuadTree<K, G>,
    area: Option<Aabb>,
    stack: Vec<NodeIdx>,
    current: Option<btree_map::Iter<'a, K, G>>,
}

impl<'a, K: Ord + Copy, G: Placement> Walk<'a, K, G> {
    fn new(tree: &'a QuadTree<K, G>, area: Option<Aabb>) -> Self {
        Self {
            tree,
            area,
            stack: vec![NodeIdx::ROOT],
            current: None,
        }
    }

    /// Advance to the next node whose entries should be drained.
    fn enter_next(&mut self) -> bool {
        let tree = self.tree;
        while let Some(at) = self.stack.pop() {
            let node = tree.node(at);
            if let Some(area) = &self.area
                && !node.bounds.intersects(area)
            {
                continue;
            }
            if let Some(children) = node.children {
                self.stack.extend(children.into_iter().rev());
            }
            self.current = Some(node.entries.iter());
            return true;
        }
        self.current = None;
        false
    }
}

impl<'a, K: Ord + Copy, G: Placement> Iterator for Walk<'a, K, G> {
    type Item = (K, &'a G);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entries) = &mut self.current
                && let Some((k, g)) = entries.next()
            {
                return Some((*k, g));
            }
            if !self.enter_next() {
                return None;
            }
        }
    }
}

/// Iterator over every `(key, geometry)` pair of a tree.
///
/// Returned by [`QuadTree::iter`].
pub struct Iter<'a, K, G> {
    walk: Walk<'a, K, G>,
}

impl<'a, K: Ord + Copy, G: Placement> Iter<'a, K, G> {
    pub(crate) fn new(tree: &'a QuadTree<K, G>) -> Self {
        Self {
            walk: Walk::new(tree, None),
        }
    }
}

impl<K: Ord + Copy, G: Placement> Iterator for Iter<'_, K, G> {
    type Item = (K, G);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(|(k, g)| (k, *g))
    }
}

impl<K: Ord + Copy, G: Placement> FusedIterator for Iter<'_, K, G> {}

impl<K, G> Debug for Iter<'_, K, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("pending_nodes", &self.walk.stack.len())
            .finish_non_exhaustive()
    }
}

/// Iterator over the keys hit by an area query.
///
/// Returned by [`QuadTree::query`].
pub struct Query<'a, K, G> {
    area: Aabb,
    walk: Walk<'a, K, G>,
}

impl<'a, K: Ord + Copy, G: Placement> Query<'a, K, G> {
    pub(crate) fn new(tree: &'a QuadTree<K, G>, area: Aabb) -> Self {
        Self {
            area,
            walk: Walk::new(tree, Some(area)),
        }
    }

    /// The queried area.
    pub fn area(&self) -> Aabb {
        self.area
    }
}

impl<K: Ord + Copy, G: Placement> Iterator for Query<'_, K, G> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let area = self.area;
        self.walk
            .by_ref()
            .find(|(_, g)| g.hits(&area))
            .map(|(k, _)| k)
    }
}

impl<K: Ord + Copy, G: Placement> FusedIterator for Query<'_, K, G> {}

impl<K, G> Debug for Query<'_, K, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Query")
            .field("area", &self.area)
            .field("pending_nodes", &self.walk.stack.len())
            .finish_non_exhaustive()
    }
}

/// Structural snapshot of one tree node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeView {
    /// Bounds of the node.
    pub bounds: Aabb,
    /// Distance from the root (the root has depth 0).
    pub depth: u32,
    /// Number of entries stored at this node itself.
    pub entries: usize,
    /// Whether the node has not been subdivided.
    pub is_leaf: bool,
}

/// Iterator over [`NodeView`]s in arena order (parents before children).
///
/// Returned by [`QuadTree::nodes`].
pub struct Nodes<'a, K, G> {
    inner: core::slice::Iter<'a, Node<K, G>>,
}

impl<'a, K, G> Nodes<'a, K, G> {
    pub(crate) fn new(nodes: &'a [Node<K, G>]) -> Self {
        Self {
            inner: nodes.iter(),
        }
    }
}

impl<K, G> Iterator for Nodes<'_, K, G> {
    type Item = NodeView;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|n| NodeView {
            bounds: n.bounds,
            depth: n.depth,
            entries: n.entries.len(),
            is_leaf: n.children.is_none(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, G> ExactSizeIterator for Nodes<'_, K, G> {}

impl<K, G> Debug for Nodes<'_, K, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Nodes")
            .field("remaining", &self.inner.len())
            .finish()
    }
}
