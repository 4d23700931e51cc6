// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hilbert curve ordering for integer grid points.
//!
//! Bulk loading and node splitting both group entries by the Hilbert index of
//! their (rounded) centers, so entries that are close in the plane end up close
//! in the order and tend to share a parent.

/// Largest supported bit width per axis.
///
/// Indices interleave two `MAX_BITS`-wide planes into a `u64`.
pub const MAX_BITS: u32 = 32;

/// Number of bits needed to represent `v`.
#[inline]
pub fn bit_width(v: u64) -> u32 {
    u64::BITS - v.leading_zeros()
}

/// Hilbert index of `(x, y)` on a `2^r × 2^r` grid.
///
/// This is a pure function: the same inputs always give the same index, and
/// consecutive indices visit grid cells that share an edge. `r` is clamped to
/// [`MAX_BITS`] and coordinates saturate at the largest value `r` bits can hold.
/// With `r == 0` every point maps to `0`.
pub fn hilbert_index(r: u32, x: u64, y: u64) -> u64 {
    let r = r.min(MAX_BITS);
    let mask = (1_u64 << r) - 1;
    let x = x.min(mask);
    let y = y.min(mask);

    let even = x ^ y;
    let not_x = !x & mask;
    let not_y = !y & mask;
    let tmp = not_x ^ y;

    let mut v0 = 0_u64;
    let mut v1 = 0_u64;
    for _ in 1..r {
        v1 = ((v1 & even) | ((v0 ^ not_y) & tmp)) >> 1;
        v0 = ((v0 & (v1 ^ not_x)) | (!v0 & (v1 ^ not_y))) >> 1;
    }
    let odd = (!v0 & (v1 ^ x)) | (v0 & (v1 ^ not_y));

    interleave_bits(odd, even)
}

/// Interleave two bit planes: bit `i` of `even` lands at `2i`, bit `i` of `odd` at `2i + 1`.
pub fn interleave_bits(odd: u64, even: u64) -> u64 {
    let mut val = 0_u64;
    for i in 0..MAX_BITS {
        val |= ((even >> i) & 1) << (2 * i);
        val |= ((odd >> i) & 1) << (2 * i + 1);
    }
    val
}

/// Stable sort of `items` by the Hilbert index of their centers.
///
/// Centers are normalized against the smallest coordinate seen on either axis,
/// and the grid size is the bit width of the spread between the smallest and
/// largest coordinate. Items with equal indices keep their relative order.
pub fn sort_by_hilbert_order<T, F>(items: &mut [T], mut center_of: F)
where
    F: FnMut(&T) -> (i64, i64),
{
    if items.len() < 2 {
        return;
    }
    let (min, max) = items
        .iter()
        .map(&mut center_of)
        .fold((i64::MAX, i64::MIN), |(lo, hi), (cx, cy)| {
            (lo.min(cx).min(cy), hi.max(cx).max(cy))
        });
    let r = bit_width(max.abs_diff(min));
    items.sort_by_cached_key(|item| {
        let (cx, cy) = center_of(item);
        hilbert_index(r, cx.abs_diff(min), cy.abs_diff(min))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn curve(r: u32) -> Vec<(u64, u64)> {
        let n = 1_u64 << r;
        let mut cells = vec![(0, 0); (n * n) as usize];
        for x in 0..n {
            for y in 0..n {
                let d = hilbert_index(r, x, y) as usize;
                assert!(d < cells.len(), "index {d} out of range for r={r}");
                cells[d] = (x, y);
            }
        }
        cells
    }

    #[test]
    fn order_one_curve() {
        assert_eq!(hilbert_index(1, 0, 0), 0);
        assert_eq!(hilbert_index(1, 0, 1), 1);
        assert_eq!(hilbert_index(1, 1, 1), 2);
        assert_eq!(hilbert_index(1, 1, 0), 3);
    }

    #[test]
    fn small_grids_are_walked_cell_by_cell() {
        for r in 1..=5 {
            let n = 1_u64 << r;
            let cells = curve(r);
            let mut seen = cells.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len() as u64, n * n, "r={r} is not a bijection");
            for w in cells.windows(2) {
                let step = w[0].0.abs_diff(w[1].0) + w[0].1.abs_diff(w[1].1);
                assert_eq!(step, 1, "r={r}: {:?} -> {:?} is not adjacent", w[0], w[1]);
            }
        }
    }

    #[test]
    fn zero_width_grid_maps_everything_to_zero() {
        assert_eq!(hilbert_index(0, 0, 0), 0);
        assert_eq!(hilbert_index(0, 7, 3), 0);
    }

    #[test]
    fn interleave_places_even_bits_first() {
        assert_eq!(interleave_bits(0, 1), 0b01);
        assert_eq!(interleave_bits(1, 0), 0b10);
        assert_eq!(interleave_bits(0b11, 0b01), 0b1011);
        assert_eq!(interleave_bits(u64::from(u32::MAX), 0), 0xAAAA_AAAA_AAAA_AAAA);
    }

    #[test]
    fn bit_widths() {
        assert_eq!(bit_width(0), 0);
        assert_eq!(bit_width(1), 1);
        assert_eq!(bit_width(4), 3);
        assert_eq!(bit_width(u64::from(u32::MAX)), 32);
    }

    #[test]
    fn sort_follows_the_curve() {
        // Corners of a 2x2 block, deliberately shuffled.
        let mut pts = vec![(1_i64, 0_i64), (1, 1), (0, 0), (0, 1)];
        sort_by_hilbert_order(&mut pts, |p| *p);
        assert_eq!(pts, vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn sort_normalizes_negative_coordinates() {
        let mut pts = vec![(-9_i64, -10_i64), (-9, -9), (-10, -10), (-10, -9)];
        sort_by_hilbert_order(&mut pts, |p| *p);
        assert_eq!(pts, vec![(-10, -10), (-10, -9), (-9, -9), (-9, -10)]);
    }

    #[test]
    fn coincident_centers_keep_input_order() {
        let mut pts = vec![(5_i64, 5_i64, 'a'), (5, 5, 'b'), (5, 5, 'c')];
        sort_by_hilbert_order(&mut pts, |p| (p.0, p.1));
        let tags: Vec<char> = pts.iter().map(|p| p.2).collect();
        assert_eq!(tags, vec!['a', 'b', 'c']);
    }
}
