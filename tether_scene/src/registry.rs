// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entity registry: rectangles, reference lines, the link table, and the spatial index.
//!
//! ## Index synchronization
//!
//! Every rectangle carries two boxes: its live `bounds` and the `indexed_bounds` it is
//! currently stored under in the quadtree. The quadtree finds entries by descending
//! through the nodes their bounds overlap, so removal must be given the indexed bounds,
//! never the live ones. [`Registry::translate_rectangle`] only moves the live bounds;
//! [`Registry::sync_index`] commits them. Until then the rectangle is tracked as
//! unsynced, and overlap checks use its live bounds instead of the index entry.
//!
//! ## Link table
//!
//! Each rectangle maps to the set of finalized lines anchored to it. A finalized line
//! appears in the sets of both of its anchors and nowhere else. Pending lines are not
//! linked until they are finalized.

use std::collections::{BTreeMap, BTreeSet};

use tether_quadtree::{Aabb2D, Item, QuadTree, SpatialIndex};
use tracing::debug;

use crate::geometry::{Point, near_segment};
use crate::types::{Color, LineId, RectId, RectangleRecord, ReferenceLine};

#[derive(Clone, Debug)]
struct RectEntry {
    record: RectangleRecord,
    indexed_bounds: Aabb2D<i64>,
}

/// Owner of every rectangle and reference line in a scene.
pub struct Registry {
    rectangles: BTreeMap<RectId, RectEntry>,
    lines: BTreeMap<LineId, ReferenceLine>,
    links: BTreeMap<RectId, BTreeSet<LineId>>,
    index: QuadTree<i64, RectId, Color>,
    unsynced: BTreeSet<RectId>,
    next_rect: u64,
    next_line: u64,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("rectangles", &self.rectangles.len())
            .field("lines", &self.lines.len())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Create an empty registry over `world`.
    pub fn new(world: Aabb2D<i64>, capacity: usize, max_depth: usize) -> Self {
        Self {
            rectangles: BTreeMap::new(),
            lines: BTreeMap::new(),
            links: BTreeMap::new(),
            index: QuadTree::with_max_depth(world, capacity, max_depth),
            unsynced: BTreeSet::new(),
            next_rect: 0,
            next_line: 0,
        }
    }

    /// Place a rectangle.
    ///
    /// Returns `None` without side effects when `bounds` is empty, overlaps an existing
    /// rectangle, or lies outside the world.
    pub fn create_rectangle(&mut self, bounds: Aabb2D<i64>, color: Color) -> Option<RectId> {
        if bounds.is_empty() {
            debug!(?bounds, "create rejected: empty bounds");
            return None;
        }
        if let Some(hit) = self.overlapping(bounds) {
            debug!(?bounds, overlaps = ?hit, "create rejected: overlap");
            return None;
        }
        let id = RectId(self.next_rect);
        if !self.index.insert(Item::new(id, bounds, color)) {
            debug!(?bounds, "create rejected: outside world");
            return None;
        }
        self.next_rect += 1;
        self.rectangles.insert(
            id,
            RectEntry {
                record: RectangleRecord { id, bounds, color },
                indexed_bounds: bounds,
            },
        );
        self.links.insert(id, BTreeSet::new());
        debug!(rect = ?id, ?bounds, "rectangle created");
        Some(id)
    }

    /// Remove a rectangle along with every line anchored to it.
    pub fn delete_rectangle(&mut self, id: RectId) -> bool {
        let Some(entry) = self.rectangles.remove(&id) else {
            return false;
        };
        self.unsynced.remove(&id);
        let removed = self.index.remove(id, entry.indexed_bounds);
        debug_assert!(removed.is_some(), "rectangle {id:?} missing from index");
        let anchored: Vec<LineId> = self
            .lines
            .values()
            .filter(|line| line.is_anchored_to(id))
            .map(|line| line.id)
            .collect();
        for line in anchored {
            self.delete_line(line);
        }
        self.links.remove(&id);
        debug!(rect = ?id, "rectangle deleted");
        true
    }

    /// The lowest-id rectangle whose live bounds overlap `bounds`.
    ///
    /// Synced rectangles are found through the index; rectangles moved since their last
    /// sync are checked directly.
    pub fn overlapping(&self, bounds: Aabb2D<i64>) -> Option<RectId> {
        let indexed = self
            .index
            .query_rect(bounds)
            .map(|item| item.id)
            .find(|id| !self.unsynced.contains(id));
        let moved = self.unsynced.iter().copied().find(|id| {
            self.rectangles
                .get(id)
                .is_some_and(|entry| entry.record.bounds.intersects(&bounds))
        });
        match (indexed, moved) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The single rectangle under `point`, if exactly one is there.
    pub fn rect_at_point(&self, point: Point) -> Option<RectId> {
        let mut hits = self.index.query_point(point.x, point.y);
        let first = hits.next()?;
        if hits.next().is_some() {
            return None;
        }
        Some(first.id)
    }

    /// Start a pending line on `rect_a`, with both ends at `anchor`.
    pub fn create_line(&mut self, rect_a: RectId, anchor: Point) -> Option<LineId> {
        if !self.rectangles.contains_key(&rect_a) {
            debug!(rect = ?rect_a, "line rejected: no such rectangle");
            return None;
        }
        let id = LineId(self.next_line);
        self.next_line += 1;
        self.lines.insert(
            id,
            ReferenceLine {
                id,
                rect_a,
                rect_b: None,
                start: anchor,
                end: anchor,
            },
        );
        debug!(line = ?id, rect = ?rect_a, "line started");
        Some(id)
    }

    /// Move the loose end of a pending line.
    pub fn extend_line(&mut self, id: LineId, end: Point) -> bool {
        match self.lines.get_mut(&id) {
            Some(line) if line.is_pending() => {
                line.end = end;
                true
            }
            _ => false,
        }
    }

    /// Attach a pending line to the rectangle under `candidate`.
    ///
    /// Succeeds only when exactly one rectangle is there and it is not the line's first
    /// anchor. The end point snaps to `candidate`. On failure the pending line is
    /// discarded. Finalized or unknown lines are left alone and report `false`.
    pub fn finalize_line(&mut self, id: LineId, candidate: Point) -> bool {
        let Some(rect_a) = self
            .lines
            .get(&id)
            .filter(|line| line.is_pending())
            .map(|line| line.rect_a)
        else {
            return false;
        };
        let rect_b = match self.rect_at_point(candidate) {
            Some(rect_b) if rect_b != rect_a => rect_b,
            other => {
                debug!(line = ?id, under = ?other, "line discarded");
                self.lines.remove(&id);
                return false;
            }
        };
        if let Some(line) = self.lines.get_mut(&id) {
            line.rect_b = Some(rect_b);
            line.end = candidate;
        }
        self.links.entry(rect_a).or_default().insert(id);
        self.links.entry(rect_b).or_default().insert(id);
        debug!(line = ?id, from = ?rect_a, to = ?rect_b, "line finalized");
        true
    }

    /// Remove the lowest-id finalized line passing within `tolerance` of `point`.
    pub fn delete_line_at(&mut self, point: Point, tolerance: f64) -> Option<LineId> {
        let Some(id) = self
            .lines
            .values()
            .filter(|line| !line.is_pending())
            .find(|line| near_segment(point, line.start, line.end, tolerance))
            .map(|line| line.id)
        else {
            debug!(?point, "no line near point");
            return None;
        };
        self.delete_line(id);
        Some(id)
    }

    /// Remove a line, pending or finalized, and unlink it from its anchors.
    pub fn delete_line(&mut self, id: LineId) -> bool {
        let Some(line) = self.lines.remove(&id) else {
            return false;
        };
        for rect in [Some(line.rect_a), line.rect_b].into_iter().flatten() {
            if let Some(set) = self.links.get_mut(&rect) {
                set.remove(&id);
            }
        }
        debug!(line = ?id, "line deleted");
        true
    }

    /// Shift a rectangle's live bounds and the endpoints anchored to it.
    ///
    /// The index is not touched; call [`Registry::sync_index`] to commit. Returns
    /// `false` without moving anything when the id is unknown or the rectangle would
    /// not lie fully inside the world.
    pub fn translate_rectangle(&mut self, id: RectId, dx: i64, dy: i64) -> bool {
        let world = self.index.boundary();
        let Some(entry) = self.rectangles.get_mut(&id) else {
            return false;
        };
        let moved = entry.record.bounds.translate(dx, dy);
        if world.intersect(&moved) != moved {
            debug!(rect = ?id, dx, dy, "translate rejected: leaves the world");
            return false;
        }
        entry.record.bounds = moved;
        if moved == entry.indexed_bounds {
            self.unsynced.remove(&id);
        } else {
            self.unsynced.insert(id);
        }
        if let Some(set) = self.links.get(&id) {
            for line_id in set {
                let Some(line) = self.lines.get_mut(line_id) else {
                    continue;
                };
                if line.rect_a == id {
                    line.start = line.start.translate(dx, dy);
                } else {
                    line.end = line.end.translate(dx, dy);
                }
            }
        }
        true
    }

    /// Store a rectangle's live bounds in the index.
    ///
    /// Returns `false` only for an unknown id or if the index did not hold the entry
    /// under its recorded bounds.
    pub fn sync_index(&mut self, id: RectId) -> bool {
        let Some(entry) = self.rectangles.get_mut(&id) else {
            return false;
        };
        if entry.indexed_bounds == entry.record.bounds {
            self.unsynced.remove(&id);
            return true;
        }
        let updated = self
            .index
            .update(id, entry.indexed_bounds, entry.record.bounds);
        debug_assert!(updated, "index lost track of rectangle {id:?}");
        if updated {
            entry.indexed_bounds = entry.record.bounds;
            self.unsynced.remove(&id);
        }
        updated
    }

    /// Whether the index holds exactly the registered rectangles under their indexed
    /// bounds, and every rectangle other than `in_flight` has been synced.
    pub fn index_matches(&self, in_flight: Option<RectId>) -> bool {
        let mut expected = self.rectangles.values();
        for item in self.index.traverse() {
            let Some(entry) = expected.next() else {
                return false;
            };
            if item.id != entry.record.id || item.bounds != entry.indexed_bounds {
                return false;
            }
            if in_flight != Some(item.id) && entry.indexed_bounds != entry.record.bounds {
                return false;
            }
        }
        expected.next().is_none()
    }

    /// A rectangle by id.
    pub fn rectangle(&self, id: RectId) -> Option<&RectangleRecord> {
        self.rectangles.get(&id).map(|entry| &entry.record)
    }

    /// The bounds a rectangle is stored under in the index.
    pub fn indexed_bounds(&self, id: RectId) -> Option<Aabb2D<i64>> {
        self.rectangles.get(&id).map(|entry| entry.indexed_bounds)
    }

    /// A line by id.
    pub fn line(&self, id: LineId) -> Option<&ReferenceLine> {
        self.lines.get(&id)
    }

    /// Finalized lines anchored to a rectangle.
    pub fn links(&self, id: RectId) -> Option<&BTreeSet<LineId>> {
        self.links.get(&id)
    }

    /// All rectangles in id order.
    pub fn rectangles(&self) -> impl Iterator<Item = &RectangleRecord> + '_ {
        self.rectangles.values().map(|entry| &entry.record)
    }

    /// All lines, pending ones included, in id order.
    pub fn lines(&self) -> impl Iterator<Item = &ReferenceLine> + '_ {
        self.lines.values()
    }

    /// The spatial index.
    pub fn index(&self) -> &QuadTree<i64, RectId, Color> {
        &self.index
    }

    /// Number of rectangles.
    pub fn rectangle_count(&self) -> usize {
        self.rectangles.len()
    }

    /// Number of lines, pending ones included.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn registry() -> Registry {
        Registry::new(Aabb2D::from_xywh(0, 0, 800, 600), 4, 12)
    }

    fn square(x: i64, y: i64) -> Aabb2D<i64> {
        Aabb2D::from_xywh(x, y, 50, 50)
    }

    /// Two rectangles joined by a finalized line.
    fn linked_pair(reg: &mut Registry) -> (RectId, RectId, LineId) {
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        let b = reg.create_rectangle(square(475, 475), RED).unwrap();
        let line = reg.create_line(a, Point::new(100, 100)).unwrap();
        assert!(reg.extend_line(line, Point::new(300, 300)));
        assert!(reg.finalize_line(line, Point::new(500, 500)));
        (a, b, line)
    }

    #[test]
    fn create_rejects_overlap_but_allows_touching() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        assert_eq!(reg.create_rectangle(square(100, 100), RED), None);
        let b = reg.create_rectangle(square(125, 75), RED).unwrap();
        assert!(a < b);
        assert_eq!(reg.rectangle_count(), 2);
        assert_eq!(reg.links(b).map(BTreeSet::len), Some(0));
    }

    #[test]
    fn create_rejects_empty_and_outside() {
        let mut reg = registry();
        assert_eq!(reg.create_rectangle(Aabb2D::from_xywh(10, 10, 0, 50), RED), None);
        assert_eq!(reg.create_rectangle(square(900, 100), RED), None);
        assert_eq!(reg.rectangle_count(), 0);
        // A rejected create does not burn an id.
        assert_eq!(reg.create_rectangle(square(0, 0), RED), Some(RectId(0)));
    }

    #[test]
    fn rect_at_point_uses_half_open_bounds() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        let b = reg.create_rectangle(square(125, 75), RED).unwrap();
        assert_eq!(reg.rect_at_point(Point::new(124, 80)), Some(a));
        assert_eq!(reg.rect_at_point(Point::new(125, 80)), Some(b));
        assert_eq!(reg.rect_at_point(Point::new(10, 10)), None);
    }

    #[test]
    fn finalized_line_is_linked_once_on_both_ends() {
        let mut reg = registry();
        let (a, b, line) = linked_pair(&mut reg);
        let record = reg.line(line).unwrap();
        assert_eq!(record.rect_b, Some(b));
        assert_eq!(record.end, Point::new(500, 500));
        assert_eq!(reg.links(a).unwrap().iter().copied().collect::<Vec<_>>(), [line]);
        assert_eq!(reg.links(b).unwrap().iter().copied().collect::<Vec<_>>(), [line]);
        // A finalized line cannot be extended or finalized again.
        assert!(!reg.extend_line(line, Point::new(0, 0)));
        assert!(!reg.finalize_line(line, Point::new(100, 100)));
    }

    #[test]
    fn finalizing_on_start_rectangle_discards_without_linking() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        let line = reg.create_line(a, Point::new(100, 100)).unwrap();
        assert!(!reg.finalize_line(line, Point::new(110, 110)));
        assert!(reg.line(line).is_none());
        assert!(reg.links(a).unwrap().is_empty());
    }

    #[test]
    fn finalizing_on_empty_space_discards() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        let line = reg.create_line(a, Point::new(100, 100)).unwrap();
        assert!(!reg.finalize_line(line, Point::new(400, 400)));
        assert_eq!(reg.line_count(), 0);
    }

    #[test]
    fn create_line_requires_live_rectangle() {
        let mut reg = registry();
        assert_eq!(reg.create_line(RectId(7), Point::new(1, 1)), None);
    }

    #[test]
    fn delete_line_at_removes_from_both_link_sets() {
        let mut reg = registry();
        let (a, b, line) = linked_pair(&mut reg);
        assert_eq!(reg.delete_line_at(Point::new(700, 100), 0.2), None);
        assert_eq!(reg.delete_line_at(Point::new(300, 305), 0.2), Some(line));
        assert!(reg.links(a).unwrap().is_empty());
        assert!(reg.links(b).unwrap().is_empty());
        assert_eq!(reg.line_count(), 0);
    }

    #[test]
    fn delete_line_at_prefers_lowest_id_and_skips_pending() {
        let mut reg = registry();
        let (a, _, first) = linked_pair(&mut reg);
        let c = reg.create_rectangle(square(275, 275), RED).unwrap();
        let second = reg.create_line(c, Point::new(290, 290)).unwrap();
        assert!(reg.finalize_line(second, Point::new(480, 480)));
        let pending = reg.create_line(a, Point::new(90, 90)).unwrap();
        reg.extend_line(pending, Point::new(600, 600));
        // (400, 400) lies on all three segments.
        assert_eq!(reg.delete_line_at(Point::new(400, 400), 0.2), Some(first));
        assert_eq!(reg.delete_line_at(Point::new(400, 400), 0.2), Some(second));
        assert_eq!(reg.delete_line_at(Point::new(400, 400), 0.2), None);
        assert!(reg.line(pending).is_some());
    }

    #[test]
    fn translate_moves_anchored_endpoints() {
        let mut reg = registry();
        let (a, b, line) = linked_pair(&mut reg);
        assert!(reg.translate_rectangle(a, 10, -5));
        assert!(reg.translate_rectangle(b, -20, 0));
        let record = reg.line(line).unwrap();
        assert_eq!(record.start, Point::new(110, 95));
        assert_eq!(record.end, Point::new(480, 500));
        // Index still holds the old bounds until synced.
        assert_eq!(reg.indexed_bounds(a), Some(square(75, 75)));
        assert!(!reg.index_matches(None));
        assert!(reg.sync_index(a));
        assert!(reg.sync_index(b));
        assert!(reg.index_matches(None));
        assert_eq!(reg.rect_at_point(Point::new(85, 72)), Some(a));
    }

    #[test]
    fn in_flight_rectangle_may_run_ahead_of_index() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        reg.translate_rectangle(a, 100, 0);
        assert!(reg.index_matches(Some(a)));
        assert!(!reg.index_matches(None));
    }

    #[test]
    fn translate_refuses_to_leave_the_world() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        assert!(!reg.translate_rectangle(a, 5000, 0));
        assert!(!reg.translate_rectangle(a, 0, -76));
        assert_eq!(reg.rectangle(a).unwrap().bounds, square(75, 75));
        // Flush against the far corner is still inside.
        assert!(reg.translate_rectangle(a, 675, 475));
        assert!(reg.sync_index(a));
        assert_eq!(reg.index().len(), 1);
        assert_eq!(reg.indexed_bounds(a), Some(square(750, 550)));
        assert!(reg.index_matches(None));
    }

    #[test]
    fn overlap_checks_use_live_bounds_of_moved_rectangles() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(75, 75), RED).unwrap();
        assert!(reg.translate_rectangle(a, 300, 200));
        assert_eq!(reg.overlapping(square(375, 275)), Some(a));
        assert_eq!(reg.overlapping(square(75, 75)), None);
        assert_eq!(reg.create_rectangle(square(380, 280), RED), None);
        let b = reg.create_rectangle(square(75, 75), RED).unwrap();
        assert!(reg.index_matches(Some(a)));
        assert!(reg.sync_index(a));
        assert!(reg.index_matches(None));
        let bounds_a = reg.rectangle(a).unwrap().bounds;
        let bounds_b = reg.rectangle(b).unwrap().bounds;
        assert!(!bounds_a.intersects(&bounds_b));
    }

    #[test]
    fn delete_rectangle_cascades_to_lines() {
        let mut reg = registry();
        let (a, b, line) = linked_pair(&mut reg);
        let pending = reg.create_line(a, Point::new(80, 80)).unwrap();
        assert!(reg.delete_rectangle(a));
        assert!(reg.line(line).is_none());
        assert!(reg.line(pending).is_none());
        assert!(reg.links(a).is_none());
        assert!(reg.links(b).unwrap().is_empty());
        assert!(reg.index().query_rect(square(75, 75)).next().is_none());
        assert!(reg.index_matches(None));
        assert!(!reg.delete_rectangle(a));
    }

    #[test]
    fn ids_are_not_reused() {
        let mut reg = registry();
        let a = reg.create_rectangle(square(0, 0), RED).unwrap();
        reg.delete_rectangle(a);
        let b = reg.create_rectangle(square(0, 0), RED).unwrap();
        assert_ne!(a, b);
    }
}
