// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Spatial: adaptive quadtrees and a uniform grid for moving 2D entities.
//!
//! Understory Spatial answers proximity and containment questions such as
//! "who is near this agent", "which walls overlap this box", or "what is inside
//! this selection rectangle".
//!
//! - [`PointIndex`]: quadtree keyed by one position per entity. Nodes split once they
//!   hold more than a handful of points.
//! - [`RegionIndex`]: quadtree keyed by one box per entity. Boxes sink to the
//!   deepest node that fully contains them; boxes that straddle a split stay higher up.
//! - [`UniformGrid`]: fixed cells with constant-cost updates, for entities that are spread
//!   evenly (flocks, particles).
//!
//! Geometry is expressed with Kurbo's [`Point`](kurbo::Point) and a center/half-extent [`Aabb`].
//! Keys are small caller-owned identifiers (`Copy`; `Ord` for the trees).
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_spatial::{Aabb, PointIndex};
//!
//! let world = Aabb::new(Point::ZERO, Vec2::new(500.0, 500.0));
//! let mut idx: PointIndex<u32> = PointIndex::new(world);
//! assert!(idx.insert(1, Point::new(10.0, 10.0)));
//! assert!(idx.insert(2, Point::new(-200.0, 40.0)));
//!
//! // Entities move: tell the index where they were and where they are now.
//! idx.update(1, Point::new(10.0, 10.0), Point::new(12.0, 9.0));
//!
//! let near: Vec<_> = idx.query(Aabb::from_center_radius(Point::ZERO, 20.0)).collect();
//! assert_eq!(near, [1]);
//! ```
//!
//! Line obstacles go into a region tree and are found by overlap:
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_spatial::{Aabb, RegionIndex};
//!
//! let arena = Aabb::new(Point::ZERO, Vec2::new(256.0, 256.0));
//! let mut walls: RegionIndex<u16> = RegionIndex::new(arena);
//! walls.insert(0, Aabb::from_rect(Rect::new(-10.0, 50.0, 10.0, 52.0)));
//! let hits: Vec<_> = walls.query(Aabb::from_rect(Rect::new(5.0, 40.0, 30.0, 60.0))).collect();
//! assert_eq!(hits, [0]);
//! ```
//!
//! Flocking neighbors come from the grid; the distance check stays with the caller:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_spatial::{Aabb, GridConfig, UniformGrid};
//!
//! let world = Aabb::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let mut grid = UniformGrid::new(GridConfig::new(world, 10, 10).with_max_results(64));
//! grid.insert('a', Point::new(5.0, 5.0));
//! grid.insert('b', Point::new(95.0, 95.0));
//! let all: Vec<_> = grid.query(Point::new(50.0, 50.0), 200.0).collect();
//! assert_eq!(all.len(), 2);
//! ```
//!
//! ## Choosing an index
//!
//! - `PointIndex`: irregular or clustered positions; cost follows local density.
//! - `RegionIndex`: extended shapes (walls, line segments). Boxes crossing a split line are
//!   kept at the coarser node, so very long boxes are always visited from near the root.
//! - `UniformGrid`: near-uniform density and frequent movement; updates that stay in a cell
//!   are free. Range queries return whole cells, so filter by exact distance afterwards.
//!
//! ## Contracts
//!
//! - Out-of-bounds inserts and removes of absent keys return `false`.
//! - `update` assumes the caller knows the previous geometry; a mismatch panics. Use
//!   [`QuadTree::try_update`] to get a [`SpatialError`] instead.
//! - Iterators borrow the index, so it cannot be mutated while they are alive.
//! - Result order is unspecified.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates. Containment and overlap tests are closed
//! (edges inclusive).
//!
//! ## Features
//!
//! - `std` *(default)*: builds Kurbo with `std`.
//! - `libm`: builds Kurbo with `libm` for `no_std` targets.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod grid;
pub mod point;
pub mod region;
pub mod traversal;
pub mod tree;
pub mod types;

pub use config::{GridConfig, TreeConfig};
pub use error::SpatialError;
pub use grid::{GridQuery, UniformGrid};
pub use point::PointIndex;
pub use region::RegionIndex;
pub use traversal::{Iter, NodeView, Nodes, Query};
pub use tree::{Placement, QuadTree};
pub use types::Aabb;
