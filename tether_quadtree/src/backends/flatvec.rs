// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets and
//! as a reference when checking other backends.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::SpatialIndex;
use crate::types::{Aabb2D, Item};

/// Flat vector backend with linear scans.
///
/// Shares the boundary and ordering rules of [`QuadTree`](crate::QuadTree) so the two
/// give identical answers for the same operations: inserts must overlap the boundary,
/// and queries only match inside it.
pub struct FlatVec<T, K, P> {
    boundary: Aabb2D<T>,
    entries: Vec<Item<T, K, P>>,
}

impl<T, K, P> FlatVec<T, K, P> {
    /// Create an empty index that accepts items overlapping `boundary`.
    pub fn new(boundary: Aabb2D<T>) -> Self {
        Self {
            boundary,
            entries: Vec::new(),
        }
    }
}

impl<T: Debug, K, P> Debug for FlatVec<T, K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("boundary", &self.boundary)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

fn sorted<'a, T, K: Ord, P>(
    mut out: Vec<&'a Item<T, K, P>>,
) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a> {
    out.sort_by(|a, b| a.id.cmp(&b.id));
    Box::new(out.into_iter())
}

impl<T: Copy + PartialOrd, K: Copy + Ord, P> SpatialIndex<T, K, P> for FlatVec<T, K, P> {
    fn insert(&mut self, item: Item<T, K, P>) -> bool {
        if !self.boundary.intersects(&item.bounds) {
            return false;
        }
        self.entries.push(item);
        true
    }

    /// Removes by id alone. A linear scan has no reason to trust `bounds`.
    fn remove(&mut self, id: K, _bounds: Aabb2D<T>) -> Option<Item<T, K, P>> {
        let pos = self.entries.iter().position(|item| item.id == id)?;
        Some(self.entries.swap_remove(pos))
    }

    fn query_rect<'a>(
        &'a self,
        range: Aabb2D<T>,
    ) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a> {
        let range = range.intersect(&self.boundary);
        if range.is_empty() {
            return Box::new(core::iter::empty());
        }
        sorted(
            self.entries
                .iter()
                .filter(|item| item.bounds.intersects(&range))
                .collect(),
        )
    }

    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a> {
        if !self.boundary.contains_point(x, y) {
            return Box::new(core::iter::empty());
        }
        sorted(
            self.entries
                .iter()
                .filter(|item| item.bounds.contains_point(x, y))
                .collect(),
        )
    }

    fn traverse<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a> {
        sorted(self.entries.iter().collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
