// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kurbo interop.
//!
//! Index shapes by their `kurbo` bounding boxes and query with a
//! `kurbo::Rect` viewport.
//!
//! Run:
//! - `cargo run -p periodic_rtree_demos --example kurbo_interop`

use kurbo::{Circle, Point, Shape};
use periodic_rtree::{RTree, Rect, SearchOptions};

fn main() {
    let shapes: Vec<Circle> = (0..20_i32)
        .map(|i| Circle::new(Point::new(f64::from(i) * 25.0, f64::from(i % 4) * 30.0), 8.0))
        .collect();

    let mut tree = RTree::new(6).unwrap();
    for (i, c) in shapes.iter().enumerate() {
        tree.insert(Rect::from(c.bounding_box()), i).unwrap();
    }

    let viewport = kurbo::Rect::new(90.0, -10.0, 260.0, 50.0);
    let mut visible: Vec<usize> = tree
        .search_payloads(viewport.into(), &SearchOptions::new())
        .into_iter()
        .copied()
        .collect();
    visible.sort_unstable();
    println!("circles touching the viewport: {visible:?}");
    for &i in &visible {
        assert!(!shapes[i].bounding_box().intersect(viewport).is_zero_area());
    }

    if let Some(env) = tree.envelope() {
        let env: kurbo::Rect = env.into();
        println!("index envelope: {env:?}");
    }
}
