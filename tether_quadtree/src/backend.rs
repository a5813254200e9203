// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::{Aabb2D, Item};

/// A spatial index over [`Item`]s keyed by `K`.
///
/// Every backend follows the same contract:
///
/// - Items are identified by `id`. Callers keep ids unique; inserting a second item with a
///   live id is a caller error and leaves both copies in the index.
/// - Intersection is strict: items that only touch a query box are not returned.
/// - Query and traversal results are de-duplicated by id and yielded in ascending id order.
/// - Removal is guided by the bounds the item was indexed under. Passing any other bounds
///   may fail to find the entry.
pub trait SpatialIndex<T, K, P> {
    /// Insert an item. Returns `false` if its bounds fall outside the index boundary.
    fn insert(&mut self, item: Item<T, K, P>) -> bool;

    /// Remove the item with `id`, searching under `bounds`. Returns the removed item.
    fn remove(&mut self, id: K, bounds: Aabb2D<T>) -> Option<Item<T, K, P>>;

    /// Move an item: remove it using `old_bounds`, then insert it again under `new_bounds`.
    ///
    /// Returns `false` (and inserts nothing) if no item was indexed under `old_bounds`.
    fn update(&mut self, id: K, old_bounds: Aabb2D<T>, new_bounds: Aabb2D<T>) -> bool {
        let Some(mut item) = self.remove(id, old_bounds) else {
            return false;
        };
        item.bounds = new_bounds;
        self.insert(item)
    }

    /// Items whose bounds intersect `range`.
    fn query_rect<'a>(
        &'a self,
        range: Aabb2D<T>,
    ) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a>;

    /// Items whose bounds contain the point.
    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a>;

    /// Every item, once each.
    fn traverse<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Item<T, K, P>> + 'a>;

    /// Number of distinct items.
    fn len(&self) -> usize;

    /// Whether the index holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all items.
    fn clear(&mut self);
}
