// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Fill a small world, watch it subdivide, query by rectangle and point, then move and
//! remove an item.
//!
//! Run:
//! - `cargo run -p tether_demos --example quadtree_basics`

use tether_quadtree::{Aabb2D, Item, QuadTree, SpatialIndex};

fn main() {
    let world = Aabb2D::<i64>::new(0, 0, 400, 400);
    let mut tree: QuadTree<i64, u32, &str> = QuadTree::new(world, 2);

    let boxes = [
        (1, Aabb2D::from_xywh(10, 10, 40, 40), "top left"),
        (2, Aabb2D::from_xywh(300, 20, 40, 40), "top right"),
        (3, Aabb2D::from_xywh(20, 320, 40, 40), "bottom left"),
        // Straddles the vertical midline, so both top quadrants store it.
        (4, Aabb2D::from_xywh(180, 60, 40, 40), "straddler"),
        (5, Aabb2D::from_xywh(500, 500, 10, 10), "outside"),
    ];
    for (id, bounds, name) in boxes {
        let accepted = tree.insert(Item::new(id, bounds, name));
        println!("insert {id} ({name}): {accepted}");
    }
    println!("len = {}, divided = {}", tree.len(), tree.is_divided());
    println!("stats = {:?}", tree.stats());

    let window = Aabb2D::from_xywh(0, 0, 200, 200);
    let hits: Vec<_> = tree.query_rect(window).map(|item| item.id).collect();
    println!("query_rect {window:?} -> {hits:?}");

    let at: Vec<_> = tree.query_point(200, 80).map(|item| item.payload).collect();
    println!("query_point (200, 80) -> {at:?}");

    let old = Aabb2D::from_xywh(180, 60, 40, 40);
    let new = old.translate(0, 200);
    let moved = tree.update(4, old, new);
    println!("move straddler down: {moved}");
    let hits: Vec<_> = tree.query_rect(window).map(|item| item.id).collect();
    println!("query_rect {window:?} after move -> {hits:?}");

    let removed = tree.remove(1, Aabb2D::from_xywh(10, 10, 40, 40)).is_some();
    println!("remove 1: {removed}, len = {}", tree.len());
}
