// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Longitude wrap-around.
//!
//! Bulk load cities by lon/lat and query a window that crosses the
//! antimeridian. With a 360 degree period the window also finds places on the
//! far side of the seam.
//!
//! Run:
//! - `RUST_LOG=periodic_rtree=trace cargo run -p periodic_rtree_demos --example longitude_wrap`

use periodic_rtree::{RTree, Rect, SearchOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cities = [
        ("Auckland", 174.76, -36.85),
        ("Suva", 178.44, -18.14),
        ("Apia", -171.76, -13.83),
        ("Honolulu", -157.86, 21.31),
        ("Anchorage", -149.90, 61.22),
        ("Petropavlovsk", 158.65, 53.02),
        ("London", -0.13, 51.51),
        ("Quito", -78.47, -0.18),
    ];
    let mut tree = RTree::default();
    tree.batch_insert(
        cities
            .iter()
            .map(|&(name, lon, lat)| (Rect::from_xywh(lon, lat, 0.01, 0.01), name)),
    )
    .unwrap();
    info!(items = tree.len(), height = tree.height(), "loaded");

    // 170E to 190E, i.e. across the seam into 170W.
    let pacific = Rect::from_xywh(170.0, -40.0, 20.0, 50.0);
    let plain = tree.search_payloads(pacific, &SearchOptions::new());
    let wrapped = tree.search_payloads(pacific, &SearchOptions::new().with_x_period(360.0));
    println!("without wrap: {plain:?}");
    println!("with wrap:    {wrapped:?}");
    assert!(!plain.contains(&&"Apia"));
    assert!(wrapped.contains(&&"Apia"));
    assert!(!wrapped.contains(&&"London"));
}
