// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Quadtree: a generic 2D region quadtree over axis-aligned boxes.
//!
//! - Insert, update, and remove [`Item`]s (an id, the bounds it is indexed under, and a payload).
//! - Query by point or intersecting rectangle. Results are de-duplicated and sorted by id.
//! - Inspect tree shape with [`QuadTree::stats`].
//!
//! Geometry is half-open and strict: boxes that only touch along an edge do not intersect,
//! and a box with no area intersects nothing.
//!
//! The crate is generic over the scalar type `T` (`i64` and `f64` are provided) and does
//! not depend on any geometry crate. Higher layers translate their own shapes into
//! [`Aabb2D`] and keep ids stable across moves.
//!
//! Backends share the [`SpatialIndex`] trait, so callers can swap the strategy without API
//! churn. [`FlatVec`] answers every query with a linear scan and makes a convenient
//! reference for testing.
//!
//! # Example
//!
//! ```rust
//! use tether_quadtree::{Aabb2D, Item, QuadTree, SpatialIndex};
//!
//! // An 800×600 world whose leaves split past four items.
//! let mut tree: QuadTree<i64, u32, &str> = QuadTree::new(Aabb2D::from_xywh(0, 0, 800, 600), 4);
//! let a = Aabb2D::from_xywh(75, 75, 50, 50);
//! assert!(tree.insert(Item::new(1, a, "a")));
//! assert!(tree.insert(Item::new(2, Aabb2D::from_xywh(125, 75, 50, 50), "b")));
//!
//! // The two boxes share an edge, which is not an overlap.
//! let hits: Vec<_> = tree.query_rect(a).map(|item| item.id).collect();
//! assert_eq!(hits, [1]);
//!
//! // Move the first box; the old bounds guide the removal.
//! let moved = Aabb2D::from_xywh(300, 300, 50, 50);
//! assert!(tree.update(1, a, moved));
//! assert_eq!(tree.query_point(310, 310).next().map(|item| item.payload), Some("a"));
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Comparisons involving NaN
//! treat the boxes as disjoint.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod types;

pub use backend::SpatialIndex;
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::{DEFAULT_MAX_DEPTH, QuadTree, QuadTreeStats};
pub use types::{Aabb2D, Item, Scalar, ScalarAcc, area};
