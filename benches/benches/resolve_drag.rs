// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use tether_quadtree::{Aabb2D, FlatVec, Item, QuadTree, SpatialIndex};
use tether_scene::{Button, Gesture, Scene, SceneConfig, resolve};

const WORLD: Aabb2D<i64> = Aabb2D::new(0, 0, 800, 600);

/// Checkerboard of 50×50 obstacles leaving every other cell free.
fn checkerboard() -> Vec<Aabb2D<i64>> {
    let mut out = Vec::new();
    for row in 0..12_i64 {
        for col in 0..16_i64 {
            if (row + col) % 2 == 0 {
                out.push(Aabb2D::<i64>::from_xywh(col * 50, row * 50, 50, 50));
            }
        }
    }
    out
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let obstacles = checkerboard();
    let mut tree = QuadTree::<i64, u32, ()>::new(WORLD, 4);
    let mut flat = FlatVec::<i64, u32, ()>::new(WORLD);
    for (i, r) in obstacles.iter().copied().enumerate() {
        let _ = tree.insert(Item::new(i as u32 + 1, r, ()));
        let _ = flat.insert(Item::new(i as u32 + 1, r, ()));
    }
    // Starts in a free cell and sweeps across the board in several directions.
    let moving = Aabb2D::<i64>::from_xywh(50, 0, 50, 50);
    let deltas = [(700, 0), (0, 550), (700, 550), (-50, 300), (350, 17)];
    group.bench_function("quadtree", |b| {
        b.iter(|| {
            for &(dx, dy) in &deltas {
                black_box(resolve(&tree, 0, moving, dx, dy));
            }
        });
    });
    group.bench_function("flatvec", |b| {
        b.iter(|| {
            for &(dx, dy) in &deltas {
                black_box(resolve(&flat, 0, moving, dx, dy));
            }
        });
    });
    group.finish();
}

fn bench_drag_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    group.bench_function("drag_through_field", |b| {
        b.iter_batched(
            || {
                let mut scene = Scene::new(SceneConfig::default()).unwrap();
                for y in (100..600).step_by(100) {
                    for x in (100..800).step_by(100) {
                        scene.double_click((x, y).into());
                    }
                }
                scene.double_click((25, 25).into());
                scene
            },
            |mut scene| {
                scene.handle(Gesture::down((25, 25), Button::Left));
                for step in 0..64_i64 {
                    let x = 25 + step * 12;
                    let y = 25 + (step * 7) % 550;
                    black_box(scene.handle(Gesture::move_to((x, y))));
                }
                black_box(scene.handle(Gesture::up((775, 25))));
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_drag_session);
criterion_main!(benches);
