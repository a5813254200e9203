// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tether_quadtree::{Aabb2D, FlatVec, Item, QuadTree, SpatialIndex};

const WORLD: Aabb2D<i64> = Aabb2D::new(0, 0, 4096, 4096);

fn gen_grid_rects(n: usize, cell: i64) -> Vec<Aabb2D<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as i64 * cell;
            let y0 = y as i64 * cell;
            out.push(Aabb2D::<i64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_below(&mut self, bound: i64) -> i64 {
        (self.next_u64() % bound as u64) as i64
    }
}

/// Random rectangles that may overlap one another; exercises straddling copies.
fn gen_random_rects(count: usize, size: i64) -> Vec<Aabb2D<i64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x0 = rng.next_below(WORLD.max_x - size);
            let y0 = rng.next_below(WORLD.max_y - size);
            Aabb2D::<i64>::from_xywh(x0, y0, size, size)
        })
        .collect()
}

fn fill<I: SpatialIndex<i64, u32, ()>>(idx: &mut I, rects: &[Aabb2D<i64>]) {
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = idx.insert(Item::new(i as u32, r, ()));
    }
}

fn query_window<I: SpatialIndex<i64, u32, ()>>(idx: &I) -> usize {
    let mut total = 0;
    for q in 0..256_i64 {
        let x = (q % 16) * 240;
        let y = (q / 16) * 240;
        total += idx.query_rect(Aabb2D::<i64>::from_xywh(x, y, 128, 128)).count();
    }
    total
}

fn bench_insert_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_query");
    for &n in &[32_usize, 64, 128] {
        let rects = gen_grid_rects(n, 4096 / n as i64);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("quadtree_n{n}"), |b| {
            b.iter_batched(
                || QuadTree::<i64, u32, ()>::new(WORLD, 4),
                |mut idx| {
                    fill(&mut idx, &rects);
                    black_box(query_window(&idx));
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("flatvec_n{n}"), |b| {
            b.iter_batched(
                || FlatVec::<i64, u32, ()>::new(WORLD),
                |mut idx| {
                    fill(&mut idx, &rects);
                    black_box(query_window(&idx));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_query_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_heavy");
    let rects = gen_random_rects(8192, 24);
    let mut tree = QuadTree::<i64, u32, ()>::new(WORLD, 8);
    fill(&mut tree, &rects);
    let mut flat = FlatVec::<i64, u32, ()>::new(WORLD);
    fill(&mut flat, &rects);
    group.bench_function("quadtree", |b| b.iter(|| black_box(query_window(&tree))));
    group.bench_function("flatvec", |b| b.iter(|| black_box(query_window(&flat))));
    group.finish();
}

fn bench_update_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_heavy");
    for &capacity in &[2_usize, 4, 16] {
        let rects = gen_grid_rects(64, 32);
        group.bench_function(format!("quadtree_cap{capacity}"), |b| {
            b.iter_batched(
                || {
                    let mut idx = QuadTree::<i64, u32, ()>::new(WORLD, capacity);
                    fill(&mut idx, &rects);
                    idx
                },
                |mut idx| {
                    for (j, r) in rects.iter().enumerate() {
                        // Nudge every box by a small delta.
                        let dx = (j as i64 % 5) - 2;
                        let dy = ((j * 7) as i64 % 5) - 2;
                        idx.update(j as u32, *r, r.translate(dx, dy));
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_query,
    bench_query_heavy,
    bench_update_heavy,
);
criterion_main!(benches);
