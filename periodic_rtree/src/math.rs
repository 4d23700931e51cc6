// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float rounding that works with either `std` or `libm`.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("periodic_rtree requires either the `std` or the `libm` feature");

#[cfg(feature = "std")]
#[inline]
pub(crate) fn ceil(v: f64) -> f64 {
    v.ceil()
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn floor(v: f64) -> f64 {
    v.floor()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn ceil(v: f64) -> f64 {
    libm::ceil(v)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
pub(crate) fn floor(v: f64) -> f64 {
    libm::floor(v)
}
