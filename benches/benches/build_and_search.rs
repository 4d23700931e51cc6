// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use periodic_rtree::{RTree, Rect, SearchOptions};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::from_xywh(x as f64 * cell, y as f64 * cell, cell, cell));
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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Small boxes scattered over the globe in lon/lat degrees.
fn gen_lon_lat_rects(count: usize) -> Vec<Rect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let lon = rng.next_f64() * 359.0 - 180.0;
            let lat = rng.next_f64() * 179.0 - 90.0;
            Rect::from_xywh(lon, lat, 0.5, 0.5)
        })
        .collect()
}

fn indexed(rects: &[Rect]) -> Vec<(Rect, u32)> {
    rects.iter().copied().zip(0_u32..).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("insert_n{n}"), |b| {
            b.iter_batched(
                || indexed(&rects),
                |entries| {
                    let mut tree = RTree::default();
                    for (r, p) in entries {
                        let _ = tree.insert(r, p);
                    }
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("batch_insert_n{n}"), |b| {
            b.iter_batched(
                || indexed(&rects),
                |entries| {
                    let mut tree = RTree::default();
                    let _ = tree.batch_insert(entries);
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for &max_nodes in &[4usize, 8, 16] {
        let rects = gen_grid_rects(128, 10.0);
        let mut tree = RTree::new(max_nodes).unwrap();
        tree.batch_insert(indexed(&rects)).unwrap();
        let window = Rect::from_xywh(100.0, 100.0, 400.0, 400.0);

        group.bench_function(format!("window_m{max_nodes}"), |b| {
            b.iter(|| black_box(tree.search(window, &SearchOptions::new()).len()))
        });
        group.bench_function(format!("window_included_only_m{max_nodes}"), |b| {
            let opts = SearchOptions::new().included_only();
            b.iter(|| black_box(tree.search(window, &opts).len()))
        });
    }
    group.finish();
}

fn bench_periodic_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("periodic_search");
    let rects = gen_lon_lat_rects(50_000);
    let mut tree = RTree::default();
    tree.batch_insert(indexed(&rects)).unwrap();
    let opts = SearchOptions::new().with_x_period(360.0);

    // Straddles the antimeridian, so two passes find hits.
    let seam = Rect::from_xywh(170.0, -10.0, 20.0, 20.0);
    group.bench_function("antimeridian_window", |b| {
        b.iter(|| black_box(tree.search(seam, &opts).len()))
    });
    let inland = Rect::from_xywh(0.0, -10.0, 20.0, 20.0);
    group.bench_function("single_pass_window", |b| {
        b.iter(|| black_box(tree.search(inland, &opts).len()))
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_search, bench_periodic_search);
criterion_main!(benches);
