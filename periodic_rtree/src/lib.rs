// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Periodic R-tree: a dynamic 2D spatial index with wrap-around window queries.
//!
//! - Insert axis-aligned rectangles one at a time; overflowing nodes split along
//!   the Hilbert curve and the tree grows at the root.
//! - Bulk load a whole dataset with [`RTree::batch_insert`], which packs
//!   Hilbert-sorted entries layer by layer.
//! - Search by window, optionally repeating the window at every multiple of an
//!   x period so a query can cross a seam such as the antimeridian.
//!
//! The tree is single-threaded and synchronous; callers serialize writes
//! against reads themselves.
//!
//! # Example
//!
//! ```rust
//! use periodic_rtree::{Rect, RTree, SearchOptions};
//!
//! let mut tree = RTree::new(4).unwrap();
//! tree.insert(Rect::from_xywh(0.0, 0.0, 1.0, 1.0), "a").unwrap();
//! tree.insert(Rect::from_xywh(10.0, 10.0, 1.0, 1.0), "b").unwrap();
//! tree.insert(Rect::from_xywh(170.0, 0.0, 5.0, 5.0), "east").unwrap();
//!
//! let hits = tree.search_payloads(Rect::from_xywh(0.0, 0.0, 2.0, 2.0), &SearchOptions::new());
//! assert_eq!(hits, vec![&"a"]);
//!
//! // A window straddling the antimeridian finds "east" through its wrapped copy.
//! let opts = SearchOptions::new().with_x_period(360.0);
//! let hits = tree.search_payloads(Rect::from_xywh(-200.0, 0.0, 20.0, 10.0), &opts);
//! assert_eq!(hits, vec![&"east"]);
//! ```
//!
//! ## Search semantics
//!
//! A subtree fully inside the window is reported whole. Otherwise leaves are
//! reported when their box overlaps the window (touching edges do not count).
//! [`SearchFlags::INCLUDED_ONLY`] drops leaves that only partly overlap, and
//! [`SearchFlags::SEARCH_INDEX`] reports insertion sequence ids instead of
//! payloads.
//!
//! ## Features
//!
//! - `std` (default): float rounding from `std`.
//! - `libm`: float rounding from `libm`, for `no_std` targets.
//! - `kurbo`: conversions between [`Rect`] and `kurbo::Rect`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod hilbert;
mod math;
pub mod node;
pub mod search;
pub mod tree;
pub mod types;

pub use error::{Error, Result};
pub use node::NodeId;
pub use search::{LeafField, LeafValue, SearchFlags, SearchOptions};
pub use tree::{DEFAULT_MAX_NODES, RTree};
pub use types::Rect;
