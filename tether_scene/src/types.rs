// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: identifiers, colors, entity records, and render views.

use tether_quadtree::Aabb2D;

use crate::geometry::Point;

/// Identifier for a rectangle.
///
/// Allocated from a per-registry counter that only moves forward, so an id is never
/// reused after its rectangle is deleted. Ids order by creation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectId(pub(crate) u64);

impl RectId {
    /// The raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifier for a reference line. Same allocation rules as [`RectId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineId(pub(crate) u64);

impl LineId {
    /// The raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// 8-bit RGB display color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as `0xRRGGBB`.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Canonical record of a placed rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RectangleRecord {
    /// Identity.
    pub id: RectId,
    /// Live bounds. During a drag these run ahead of the bounds stored in the index.
    pub bounds: Aabb2D<i64>,
    /// Display color.
    pub color: Color,
}

/// A reference line between two rectangles.
///
/// `rect_b` is `None` while the line is still being drawn. Once finalized the two
/// anchors differ and both are live. `start` follows `rect_a` and `end` follows `rect_b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReferenceLine {
    /// Identity.
    pub id: LineId,
    /// Rectangle the line was started on.
    pub rect_a: RectId,
    /// Rectangle the line was finished on.
    pub rect_b: Option<RectId>,
    /// Endpoint anchored to `rect_a`.
    pub start: Point,
    /// Endpoint anchored to `rect_b`, or the rubber-band end while pending.
    pub end: Point,
}

impl ReferenceLine {
    /// Whether the line is still being drawn.
    pub const fn is_pending(&self) -> bool {
        self.rect_b.is_none()
    }

    /// Whether `rect` is one of the line's anchors.
    pub fn is_anchored_to(&self, rect: RectId) -> bool {
        self.rect_a == rect || self.rect_b == Some(rect)
    }
}

/// Read-only snapshot of a rectangle for rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RectangleView {
    /// Identity.
    pub id: RectId,
    /// Current bounds.
    pub bounds: Aabb2D<i64>,
    /// Display color.
    pub color: Color,
}

impl RectangleView {
    /// Bounds as a Kurbo rectangle.
    pub fn to_kurbo_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            self.bounds.min_x as f64,
            self.bounds.min_y as f64,
            self.bounds.max_x as f64,
            self.bounds.max_y as f64,
        )
    }
}

impl From<&RectangleRecord> for RectangleView {
    fn from(record: &RectangleRecord) -> Self {
        Self {
            id: record.id,
            bounds: record.bounds,
            color: record.color,
        }
    }
}

/// Read-only snapshot of a reference line for rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineView {
    /// Identity.
    pub id: LineId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// The line is still being drawn and has no second anchor yet.
    pub pending: bool,
}

impl LineView {
    /// The segment as a Kurbo line.
    pub fn to_kurbo_line(&self) -> kurbo::Line {
        kurbo::Line::new(self.start.to_kurbo(), self.end.to_kurbo())
    }
}

impl From<&ReferenceLine> for LineView {
    fn from(line: &ReferenceLine) -> Self {
        Self {
            id: line.id,
            start: line.start,
            end: line.end,
            pending: line.is_pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_convert_to_kurbo() {
        let view = RectangleView {
            id: RectId(1),
            bounds: Aabb2D::from_xywh(75, 75, 50, 50),
            color: Color::rgb(1, 2, 3),
        };
        assert_eq!(view.to_kurbo_rect(), kurbo::Rect::new(75.0, 75.0, 125.0, 125.0));

        let line = LineView {
            id: LineId(4),
            start: Point::new(100, 100),
            end: Point::new(500, 480),
            pending: false,
        };
        let k = line.to_kurbo_line();
        assert_eq!(k.p0, kurbo::Point::new(100.0, 100.0));
        assert_eq!(k.p1, kurbo::Point::new(500.0, 480.0));
    }

    #[test]
    fn color_packs_channels() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_u32(), 0x0012_3456);
    }

    #[test]
    fn pending_line_has_single_anchor() {
        let line = ReferenceLine {
            id: LineId(0),
            rect_a: RectId(3),
            rect_b: None,
            start: Point::new(1, 1),
            end: Point::new(1, 1),
        };
        assert!(line.is_pending());
        assert!(line.is_anchored_to(RectId(3)));
        assert!(!line.is_anchored_to(RectId(4)));
        assert!(LineView::from(&line).pending);
    }
}
