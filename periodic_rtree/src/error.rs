// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by tree construction and insertion.

/// Failures raised by [`RTree`](crate::RTree) operations.
///
/// Searching never fails; only construction and insertion validate their input.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A rectangle had a negative or non-finite extent, or a non-finite origin.
    #[error("invalid geometry: x={x}, y={y}, width={width}, height={height}")]
    InvalidGeometry {
        /// Left edge of the rejected rectangle.
        x: f64,
        /// Top edge of the rejected rectangle.
        y: f64,
        /// Width of the rejected rectangle.
        width: f64,
        /// Height of the rejected rectangle.
        height: f64,
    },
    /// The node capacity must allow at least two children per node.
    #[error("invalid configuration: max_nodes must be greater than 1, got {max_nodes}")]
    InvalidConfiguration {
        /// The rejected capacity.
        max_nodes: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
