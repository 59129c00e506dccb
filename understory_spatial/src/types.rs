// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use kurbo::{Point, Rect, Vec2};

/// Axis-aligned box in 2D, stored as a center and a half extent.
///
/// All tests on this type are closed: a point lying exactly on an edge is
/// contained, and two boxes that only share an edge intersect.
///
/// The y axis grows downward, so the "north" half of a box is the one with
/// the smaller y values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Center of the box.
    pub center: Point,
    /// Half of the width (x) and half of the height (y). Expected non-negative.
    pub half_extent: Vec2,
}

impl Aabb {
    /// Create a box from its center and half extent.
    pub const fn new(center: Point, half_extent: Vec2) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Create a square box covering a circle of `radius` around `center`.
    ///
    /// Useful for neighbor queries: the box is a conservative superset of the
    /// circle, so callers still filter exact distance.
    pub const fn from_center_radius(center: Point, radius: f64) -> Self {
        Self {
            center,
            half_extent: Vec2::new(radius, radius),
        }
    }

    /// Create a box from min/max corners.
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::from_rect(Rect::from_points(min, max))
    }

    /// Create a box from a Kurbo rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            center: rect.center(),
            half_extent: Vec2::new(rect.width() * 0.5, rect.height() * 0.5),
        }
    }

    /// Convert to a Kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x(), self.min_y(), self.max_x(), self.max_y())
    }

    /// Minimum x (left).
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.center.x - self.half_extent.x
    }

    /// Minimum y (top).
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.center.y - self.half_extent.y
    }

    /// Maximum x (right).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.center.x + self.half_extent.x
    }

    /// Maximum y (bottom).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.center.y + self.half_extent.y
    }

    /// Full width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.half_extent.x * 2.0
    }

    /// Full height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.half_extent.y * 2.0
    }

    /// Whether this box contains the point (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        self.min_x() <= p.x && p.x <= self.max_x() && self.min_y() <= p.y && p.y <= self.max_y()
    }

    /// Whether this box overlaps `other` (touching edges count).
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains_aabb(&self, other: &Self) -> bool {
        self.min_x() <= other.min_x()
            && other.max_x() <= self.max_x()
            && self.min_y() <= other.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Split into four equal quadrants, ordered NW, NE, SW, SE.
    ///
    /// The quadrants share their inner edges, so together they cover the box
    /// exactly.
    pub fn quadrants(&self) -> [Self; 4] {
        let half = self.half_extent * 0.5;
        let Point { x, y } = self.center;
        [
            Self::new(Point::new(x - half.x, y - half.y), half),
            Self::new(Point::new(x + half.x, y - half.y), half),
            Self::new(Point::new(x - half.x, y + half.y), half),
            Self::new(Point::new(x + half.x, y + half.y), half),
        ]
    }
}

impl From<Rect> for Aabb {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<Aabb> for Rect {
    fn from(aabb: Aabb) -> Self {
        aabb.to_rect()
    }
}
