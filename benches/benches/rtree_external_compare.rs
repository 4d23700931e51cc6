// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use periodic_rtree::{Rect, SearchOptions};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::from_xywh(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[Rect]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.x, r.y], [r.max_x(), r.max_y()]))
        .collect()
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = Rect::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("periodic_rtree_build_query_n{n}"), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let mut tree = periodic_rtree::RTree::default();
                    for (i, r) in rects.into_iter().enumerate() {
                        let _ = tree.insert(r, i);
                    }
                    black_box(tree.search(query, &SearchOptions::new()).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("periodic_rtree_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || rects.iter().copied().enumerate().map(|(i, r)| (r, i)).collect::<Vec<_>>(),
                |entries| {
                    let mut tree = periodic_rtree::RTree::default();
                    let _ = tree.batch_insert(entries);
                    black_box(tree.search(query, &SearchOptions::new()).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.x, query.y],
                        [query.max_x(), query.max_y()],
                    );
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
