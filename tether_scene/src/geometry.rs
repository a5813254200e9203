// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer points and the small pieces of plane geometry the scene needs.

use tether_quadtree::Aabb2D;

/// A point on the integer canvas grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate, growing to the right.
    pub x: i64,
    /// Vertical coordinate, growing downward.
    pub y: i64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The point shifted by `(dx, dy)`.
    #[must_use]
    pub const fn translate(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Convert to a Kurbo point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x as f64, self.y as f64)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

/// Top-left corner for a `width × height` rectangle centered on `point`, clamped so the
/// rectangle stays inside `world`.
///
/// The rectangle is assumed to fit inside the world.
pub fn adjusted_origin(point: Point, width: i64, height: i64, world: Aabb2D<i64>) -> Point {
    Point::new(
        clamp_axis(point.x - width / 2, width, world.min_x, world.max_x),
        clamp_axis(point.y - height / 2, height, world.min_y, world.max_y),
    )
}

fn clamp_axis(v: i64, extent: i64, min: i64, max: i64) -> i64 {
    if v < min {
        min
    } else if v + extent > max {
        max - extent
    } else {
        v
    }
}

/// The rectangle with top-left corner `origin`.
pub fn rect_at(origin: Point, width: i64, height: i64) -> Aabb2D<i64> {
    Aabb2D::from_xywh(origin.x, origin.y, width, height)
}

/// Whether `point` lies on the segment `start..end`, within `tolerance`.
///
/// The test compares the point's fractional position along each axis. The two fractions
/// must agree within `tolerance`, and their mean must fall inside the segment widened
/// by `tolerance` at both ends. A segment with no extent on either axis never matches.
pub fn near_segment(point: Point, start: Point, end: Point, tolerance: f64) -> bool {
    let along = end.to_kurbo() - start.to_kurbo();
    if along.x == 0.0 || along.y == 0.0 {
        return false;
    }
    let rel = point.to_kurbo() - start.to_kurbo();
    let tx = rel.x / along.x;
    let ty = rel.y / along.y;
    let t = 0.5 * (tx + ty);
    (tx - ty).abs() < tolerance && t >= -tolerance && t <= 1.0 + tolerance
}
