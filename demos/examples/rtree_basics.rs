// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Insert a handful of boxes, run window searches with and without
//! `included_only`, and walk the node structure.
//!
//! Run:
//! - `cargo run -p periodic_rtree_demos --example rtree_basics`
//! - `RUST_LOG=periodic_rtree=debug cargo run -p periodic_rtree_demos --example rtree_basics`

use periodic_rtree::{LeafField, RTree, Rect, SearchOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = RTree::new(4).unwrap();
    for (x, y, name) in [
        (0.0, 0.0, "a"),
        (10.0, 10.0, "b"),
        (0.0, 10.0, "c"),
        (10.0, 0.0, "d"),
        (5.0, 5.0, "e"),
    ] {
        tree.insert(Rect::from_xywh(x, y, 1.0, 1.0), name).unwrap();
    }
    println!("{} items, height {}", tree.len(), tree.height());

    let everything = tree.search_payloads(Rect::from_xywh(0.0, 0.0, 11.0, 11.0), &SearchOptions::new());
    println!("whole window: {everything:?}");
    assert_eq!(everything.len(), 5);

    // Clips "e" and fully covers "a".
    let window = Rect::from_xywh(-1.0, -1.0, 6.5, 6.5);
    let loose = tree.search_payloads(window, &SearchOptions::new());
    let strict = tree.search_payloads(window, &SearchOptions::new().included_only());
    println!("overlapping: {loose:?}, contained: {strict:?}");
    assert_eq!(strict, vec![&"a"]);

    let ids = tree.search_sequence_ids(Rect::from_xywh(4.0, 4.0, 3.0, 3.0), &SearchOptions::new());
    println!("sequence ids near the middle: {ids:?}");

    for &child in tree.children(tree.root()).unwrap_or(&[]) {
        let bbox = tree.node_bbox(child).unwrap();
        let under = tree.subtree_data(child, LeafField::Payload);
        println!("child {child:?} {bbox:?} holds {} leaves", under.len());
    }
}
