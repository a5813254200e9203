// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Scene: a collision-constrained rectangle scene with anchored reference lines.
//!
//! Tether Scene is the geometric core of a canvas editor. Users place equal-sized
//! rectangles, drag them around without ever overlapping, and connect pairs of
//! rectangles with reference lines whose endpoints follow their anchors.
//!
//! - Rectangles live in a [`tether_quadtree::QuadTree`] for fast overlap queries.
//! - Drags are resolved with a swept-box slab test so a rectangle stops flush against
//!   the first obstacle in its path.
//! - Everything is driven by abstract [`Gesture`]s; rendering reads
//!   [`Scene::list_rectangles`] and [`Scene::list_lines`].
//!
//! The crate does not render, own input devices, or persist anything. It is a
//! synchronous, in-memory engine.
//!
//! ## Gestures
//!
//! | Gesture | Effect |
//! |---|---|
//! | double click | place a rectangle centered on the pointer (clamped to the world) |
//! | left press, move, release | drag the rectangle under the press |
//! | right press, move, release | draw a line from the rectangle under the press to the one under the release |
//! | control + left press | delete the reference line under the pointer |
//!
//! Rejected commands are silent: they change nothing and report
//! [`GestureOutcome::Ignored`] (or `None`/`false` on the lower-level APIs).
//!
//! ## API overview
//!
//! - [`Scene`]: gesture state machine and read-only projections.
//! - [`Registry`]: rectangle and line tables, the link table, and the spatial index.
//! - [`resolve()`]: the movement resolver, generic over any [`tether_quadtree::SpatialIndex`].
//! - [`SceneConfig`]: world size, rectangle size, quadtree tuning, line hit tolerance.
//!
//! ## Logging
//!
//! Rejected commands and gesture transitions are reported through [`tracing`] at
//! `debug` level; resolver results at `trace` level. The crate never installs a
//! subscriber.
//!
//! # Example
//!
//! ```rust
//! use tether_scene::{Button, Gesture, GestureOutcome, Scene, SceneConfig};
//!
//! let mut scene = Scene::new(SceneConfig::default()).unwrap();
//!
//! // Two 50×50 rectangles on the same row.
//! scene.handle(Gesture::double_click((100, 100)));
//! scene.handle(Gesture::double_click((400, 100)));
//!
//! // Drag the first one far to the right; it stops against the second.
//! scene.handle(Gesture::down((100, 100), Button::Left));
//! let moved = scene.handle(Gesture::move_to((700, 100)));
//! assert!(matches!(moved, GestureOutcome::Dragged { dx: 250, .. }));
//! scene.handle(Gesture::up((700, 100)));
//!
//! let rects = scene.list_rectangles();
//! assert_eq!(rects[0].bounds.max_x, rects[1].bounds.min_x);
//! assert!(scene.index_in_sync());
//! ```

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod registry;
pub mod resolve;
pub mod scene;
pub mod types;

pub use config::{ConfigError, SceneConfig};
pub use geometry::Point;
pub use gesture::{Button, Gesture, GestureKind, GestureOutcome, Modifiers};
pub use registry::Registry;
pub use resolve::{Ratio, Resolution, Sweep, resolve, sweep, swept_bounds};
pub use scene::{Action, CyclingPalette, Palette, Scene};
pub use types::{Color, LineId, LineView, RectId, RectangleRecord, RectangleView, ReferenceLine};

#[cfg(test)]
mod tests {
    use super::*;
    use tether_quadtree::{Aabb2D, SpatialIndex, area};

    #[test]
    fn end_to_end_session() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();

        let GestureOutcome::RectangleCreated(first) = scene.double_click(Point::new(100, 100))
        else {
            panic!("first rectangle should be created");
        };
        assert_eq!(
            scene.list_rectangles()[0].bounds,
            Aabb2D::from_xywh(75, 75, 50, 50)
        );

        // Same spot again overlaps.
        assert_eq!(
            scene.double_click(Point::new(100, 100)),
            GestureOutcome::Ignored
        );
        assert_eq!(scene.list_rectangles().len(), 1);

        let GestureOutcome::RectangleCreated(second) = scene.double_click(Point::new(500, 500))
        else {
            panic!("second rectangle should be created");
        };
        assert_eq!(
            scene.registry().rectangle(second).unwrap().bounds,
            Aabb2D::from_xywh(475, 475, 50, 50)
        );

        // Dragging the first by (500, 0) sweeps 75..625 × 75..125, which misses the
        // second rectangle at y 475..525, so the move is not blocked.
        scene.handle(Gesture::down((100, 100), Button::Left));
        let outcome = scene.handle(Gesture::move_to((600, 100)));
        assert_eq!(
            outcome,
            GestureOutcome::Dragged {
                rect: first,
                dx: 500,
                dy: 0,
                blocker: None,
            }
        );
        assert_eq!(
            scene.handle(Gesture::up((600, 100))),
            GestureOutcome::DragCommitted(first)
        );
        assert!(scene.index_in_sync());

        // Now drag it straight down onto the second rectangle's column.
        scene.handle(Gesture::down((600, 100), Button::Left));
        let outcome = scene.handle(Gesture::move_to((500, 600)));
        let GestureOutcome::Dragged { blocker, .. } = outcome else {
            panic!("expected a drag, got {outcome:?}");
        };
        assert_eq!(blocker, Some(second));
        scene.handle(Gesture::up((500, 600)));
        let a = scene.registry().rectangle(first).unwrap().bounds;
        let b = scene.registry().rectangle(second).unwrap().bounds;
        assert_eq!(area(&a.intersect(&b)), 0);
        assert!(a.max_y == b.min_y || a.max_x == b.min_x);

        // Connect the two rectangles with a line.
        let a_center = Point::new(a.min_x + 25, a.min_y + 25);
        scene.handle(Gesture::down(a_center, Button::Right));
        scene.handle(Gesture::move_to((500, 500)));
        let GestureOutcome::LineFinalized(line) = scene.handle(Gesture::up((500, 500))) else {
            panic!("line should connect the two rectangles");
        };
        assert_eq!(scene.registry().links(first).unwrap().len(), 1);
        assert_eq!(scene.registry().links(second).unwrap().len(), 1);

        // A control-click far from the line leaves it alone.
        let far = Gesture::down((50, 550), Button::Left).with_modifiers(Modifiers::CONTROL);
        assert_eq!(scene.handle(far), GestureOutcome::Ignored);
        scene.handle(Gesture::up((50, 550)));
        assert_eq!(scene.list_lines().len(), 1);
        assert_eq!(scene.list_lines()[0].id, line);

        assert_eq!(scene.registry().index().len(), 2);
        assert!(scene.index_in_sync());
    }

    #[test]
    fn dense_placement_keeps_index_consistent() {
        let config = SceneConfig {
            quadtree_capacity: 2,
            ..SceneConfig::default()
        };
        let mut scene = Scene::new(config).unwrap();
        for y in (25..600).step_by(50) {
            for x in (25..800).step_by(50) {
                assert!(scene.double_click(Point::new(x, y)).is_effective());
            }
        }
        assert_eq!(scene.list_rectangles().len(), 16 * 12);
        // The world is full; nothing moves.
        scene.handle(Gesture::down((25, 25), Button::Left));
        assert_eq!(
            scene.handle(Gesture::move_to((400, 25))),
            GestureOutcome::Ignored
        );
        scene.handle(Gesture::up((400, 25)));
        assert!(scene.index_in_sync());
        assert!(scene.registry().index().stats().node_count > 1);
    }
}
