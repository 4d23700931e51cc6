// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry: an axis-aligned rectangle stored as origin and size.

use crate::error::{Error, Result};
use crate::math::ceil;

/// Axis-aligned rectangle in origin/size form.
///
/// Every tree node carries one of these as its bounding box. A fresh, empty
/// node starts out with [`Rect::UNSET`], which is replaced outright the first
/// time it grows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNSET
    }
}

impl Rect {
    /// Sentinel box of an empty node: infinite position, zero extent.
    pub const UNSET: Self = Self {
        x: f64::INFINITY,
        y: f64::INFINITY,
        width: 0.0,
        height: 0.0,
    };

    /// Create a rectangle from origin and size.
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle spanning two corners, in any order.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let x = x0.min(x1);
        let y = y0.min(y1);
        Self {
            x,
            y,
            width: x0.max(x1) - x,
            height: y0.max(y1) - y,
        }
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Whether this is the [`Rect::UNSET`] sentinel (only the x origin is inspected).
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.x == f64::INFINITY
    }

    /// Area of the rectangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the interiors intersect. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.max_x()
            && self.max_x() > other.x
            && self.max_y() > other.y
            && other.max_y() > self.y
    }

    /// Whether `other` lies fully inside this rectangle, boundaries included.
    pub fn contains(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.max_x() >= other.max_x()
            && self.y <= other.y
            && self.max_y() >= other.max_y()
    }

    /// Grow to the smallest rectangle covering both `self` and `other`.
    ///
    /// An unset rectangle takes `other` verbatim.
    pub fn grow_to_fit(&mut self, other: &Self) {
        if self.is_unset() {
            *self = *other;
            return;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        self.width = self.max_x().max(other.max_x()) - x;
        self.height = self.max_y().max(other.max_y()) - y;
        self.x = x;
        self.y = y;
    }

    /// Area that would be added by growing to cover `other`.
    ///
    /// For an unset rectangle this is the full area of `other`.
    pub fn area_if_grown_by(&self, other: &Self) -> f64 {
        if self.is_unset() {
            return other.area();
        }
        let w = self.max_x().max(other.max_x()) - self.x.min(other.x);
        let h = self.max_y().max(other.max_y()) - self.y.min(other.y);
        w * h - self.area()
    }

    /// Midpoint rounded up on both axes.
    ///
    /// Only used as a Hilbert ordering key; the upward rounding keeps the
    /// ordering deterministic for equal inputs.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Centers are ordering keys; out-of-range values saturate, which is acceptable."
    )]
    pub fn center(&self) -> (i64, i64) {
        (
            ceil(self.x + self.width * 0.5) as i64,
            ceil(self.y + self.height * 0.5) as i64,
        )
    }

    /// Copy of this rectangle shifted along x.
    #[must_use]
    pub fn translate_x(&self, dx: f64) -> Self {
        Self {
            x: self.x + dx,
            ..*self
        }
    }

    /// Reject rectangles that cannot be stored in the tree.
    pub(crate) fn validated(self) -> Result<Self> {
        let ok = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0;
        if ok {
            Ok(self)
        } else {
            Err(Error::InvalidGeometry {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Self::from_corners(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(feature = "kurbo")]
impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(r.x, r.y, r.max_x(), r.max_y())
    }
}
