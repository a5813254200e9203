// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree backend with capacity-triggered subdivision.
//!
//! Leaves hold items directly. When a leaf's item count exceeds the capacity it is
//! split into four equal quadrants and every item is pushed down into each quadrant
//! it overlaps, so an item straddling a split line is stored more than once.
//! Reads de-duplicate by id.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::SpatialIndex;
use crate::types::{Aabb2D, Item, Scalar, lt};

/// Default maximum depth of a [`QuadTree`].
pub const DEFAULT_MAX_DEPTH: usize = 12;

/// Region quadtree over a fixed world boundary.
///
/// A node holds items only while it is a leaf; once divided its own item list is
/// empty. A leaf that cannot be split further (it sits at `max_depth`, or its
/// boundary is too small to halve) keeps accepting items past `capacity`.
pub struct QuadTree<T: Scalar, K, P> {
    root: Node<T, K, P>,
    capacity: usize,
    max_depth: usize,
    len: usize,
}

struct Node<T, K, P> {
    boundary: Aabb2D<T>,
    depth: usize,
    items: Vec<Item<T, K, P>>,
    // top-left, top-right, bottom-left, bottom-right
    children: Option<Box<[Node<T, K, P>; 4]>>,
}

/// Shape statistics for a [`QuadTree`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QuadTreeStats {
    /// Total number of nodes, including the root.
    pub node_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Depth of the deepest node (root is 0).
    pub max_depth: usize,
    /// Item copies stored across all leaves. Straddling items count once per leaf.
    pub stored_items: usize,
}

impl<T: Scalar, K, P> Node<T, K, P> {
    fn leaf(boundary: Aabb2D<T>, depth: usize) -> Self {
        Self {
            boundary,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    fn can_subdivide(&self, max_depth: usize) -> bool {
        let b = self.boundary;
        let mid_x = T::mid(b.min_x, b.max_x);
        let mid_y = T::mid(b.min_y, b.max_y);
        self.depth < max_depth
            && lt(b.min_x, mid_x)
            && lt(mid_x, b.max_x)
            && lt(b.min_y, mid_y)
            && lt(mid_y, b.max_y)
    }

    fn stats(&self, out: &mut QuadTreeStats) {
        out.node_count += 1;
        out.max_depth = out.max_depth.max(self.depth);
        match &self.children {
            Some(children) => children.iter().for_each(|c| c.stats(out)),
            None => {
                out.leaf_count += 1;
                out.stored_items += self.items.len();
            }
        }
    }
}

impl<T: Scalar, K: Copy + Ord, P: Clone> Node<T, K, P> {
    fn insert(&mut self, item: &Item<T, K, P>, capacity: usize, max_depth: usize) -> bool {
        if !self.boundary.intersects(&item.bounds) {
            return false;
        }
        if let Some(children) = self.children.as_mut() {
            let mut inserted = false;
            for child in children.iter_mut() {
                inserted |= child.insert(item, capacity, max_depth);
            }
            return inserted;
        }
        self.items.push(item.clone());
        if self.items.len() > capacity && self.can_subdivide(max_depth) {
            self.subdivide(capacity, max_depth);
        }
        true
    }

    fn subdivide(&mut self, capacity: usize, max_depth: usize) {
        let b = self.boundary;
        let mid_x = T::mid(b.min_x, b.max_x);
        let mid_y = T::mid(b.min_y, b.max_y);
        let depth = self.depth + 1;
        let mut children = Box::new([
            Self::leaf(Aabb2D::new(b.min_x, b.min_y, mid_x, mid_y), depth),
            Self::leaf(Aabb2D::new(mid_x, b.min_y, b.max_x, mid_y), depth),
            Self::leaf(Aabb2D::new(b.min_x, mid_y, mid_x, b.max_y), depth),
            Self::leaf(Aabb2D::new(mid_x, mid_y, b.max_x, b.max_y), depth),
        ]);
        // An item may land in several quadrants.
        for item in core::mem::take(&mut self.items) {
            for child in children.iter_mut() {
                child.insert(&item, capacity, max_depth);
            }
        }
        self.children = Some(children);
    }

    fn remove(&mut self, id: K, bounds: &Aabb2D<T>) -> Option<Item<T, K, P>> {
        if !self.boundary.intersects(bounds) {
            return None;
        }
        match self.children.as_mut() {
            None => {
                let pos = self.items.iter().position(|item| item.id == id)?;
                Some(self.items.swap_remove(pos))
            }
            Some(children) => {
                // Every copy has to go, not just the first one found.
                let mut removed = None;
                for child in children.iter_mut() {
                    if let Some(item) = child.remove(id, bounds) {
                        removed = Some(item);
                    }
                }
                removed
            }
        }
    }

    fn collect_rect<'a>(&'a self, range: &Aabb2D<T>, out: &mut BTreeMap<K, &'a Item<T, K, P>>) {
        if !self.boundary.intersects(range) {
            return;
        }
        for item in &self.items {
            if item.bounds.intersects(range) {
                out.entry(item.id).or_insert(item);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_rect(range, out);
            }
        }
    }

    fn collect_point<'a>(&'a self, x: T, y: T, out: &mut BTreeMap<K, &'a Item<T, K, P>>) {
        if !self.boundary.contains_point(x, y) {
            return;
        }
        for item in &self.items {
            if item.bounds.contains_point(x, y) {
                out.entry(item.id).or_insert(item);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_point(x, y, out);
            }
        }
    }

    fn collect_all<'a>(&'a self, out: &mut BTreeMap<K, &'a Item<T, K, P>>) {
        for item in &self.items {
            out.entry(item.id).or_insert(item);
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_all(out);
            }
        }
    }
}

impl<T: Scalar, K, P> QuadTree<T, K, P> {
    /// Create an empty quadtree over `boundary` with [`DEFAULT_MAX_DEPTH`].
    ///
    /// A leaf subdivides when it would hold more than `capacity` items. A capacity of
    /// zero is treated as one.
    pub fn new(boundary: Aabb2D<T>, capacity: usize) -> Self {
        Self::with_max_depth(boundary, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty quadtree with an explicit depth limit.
    pub fn with_max_depth(boundary: Aabb2D<T>, capacity: usize, max_depth: usize) -> Self {
        Self {
            root: Node::leaf(boundary, 0),
            capacity: capacity.max(1),
            max_depth,
            len: 0,
        }
    }

    /// The world boundary covered by the root node.
    pub fn boundary(&self) -> Aabb2D<T> {
        self.root.boundary
    }

    /// Maximum number of items a leaf holds before it subdivides.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depth below which leaves stop subdividing.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether the root has been split into quadrants.
    pub fn is_divided(&self) -> bool {
        self.root.children.is_some()
    }

    /// Walk the tree and report its shape.
    pub fn stats(&self) -> QuadTreeStats {
        let mut out = QuadTreeStats::default();
        self.root.stats(&mut out);
        out
    }
}

impl<T: Scalar, K: Copy + Ord, P: Clone> SpatialIndex<T, K, P> for QuadTree<T, K, P> {
    fn insert(&mut self, item: Item<T, K, P>) -> bool {
        let inserted = self.root.insert(&item, self.capacity, self.max_depth);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn remove(&mut self, id: K, bounds: Aabb2D<T>) -> Option<Item<T, K, P>> {
        let removed = self.root.remove(id, &bounds);
        if removed.is_some() {
            self.len = self.len.saturating_sub(1);
        }
        removed
    }

    fn query_rect<'a>(
        &'a self,
        range: Aabb2D<T>,
    ) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a> {
        let mut found = BTreeMap::new();
        // Only the part of the range inside the world can match.
        let range = range.intersect(&self.root.boundary);
        if !range.is_empty() {
            self.root.collect_rect(&range, &mut found);
        }
        Box::new(found.into_values())
    }

    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a> {
        let mut found = BTreeMap::new();
        self.root.collect_point(x, y, &mut found);
        Box::new(found.into_values())
    }

    fn traverse<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a> {
        let mut found = BTreeMap::new();
        self.root.collect_all(&mut found);
        Box::new(found.into_values())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.root = Node::leaf(self.root.boundary, 0);
        self.len = 0;
    }
}

impl<T: Scalar, K, P> Debug for QuadTree<T, K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stats = self.stats();
        f.debug_struct("QuadTree")
            .field("boundary", &self.root.boundary)
            .field("capacity", &self.capacity)
            .field("max_depth", &self.max_depth)
            .field("len", &self.len)
            .field("stats", &stats)
            .finish_non_exhaustive()
    }
}
