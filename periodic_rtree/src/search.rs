// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window search, optionally tiled along a periodic x axis.

use alloc::vec;
use alloc::vec::Vec;

use tracing::trace;

use crate::math::{ceil, floor};
use crate::tree::RTree;
use crate::types::Rect;

bitflags::bitflags! {
    /// Switches that change what a search reports.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SearchFlags: u8 {
        /// Report only leaves the query fully contains.
        const INCLUDED_ONLY = 0b0000_0001;
        /// Report insertion sequence ids instead of payloads.
        const SEARCH_INDEX  = 0b0000_0010;
    }
}

/// Options for [`RTree::search`].
///
/// The default searches once, without wrapping, and reports payloads of every
/// overlapping leaf.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchOptions {
    /// Period of the x axis (e.g. `360.0` for longitude).
    ///
    /// `None`, zero, negative, and non-finite periods all disable wrapping.
    pub x_period: Option<f64>,
    /// Behavior switches.
    pub flags: SearchFlags,
}

impl SearchOptions {
    /// Options with no period and no flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeat the search at every multiple of `period` along x.
    #[must_use]
    pub fn with_x_period(mut self, period: f64) -> Self {
        self.x_period = Some(period);
        self
    }

    /// Report only fully contained leaves.
    #[must_use]
    pub fn included_only(mut self) -> Self {
        self.flags |= SearchFlags::INCLUDED_ONLY;
        self
    }

    /// Report sequence ids instead of payloads.
    #[must_use]
    pub fn search_index(mut self) -> Self {
        self.flags |= SearchFlags::SEARCH_INDEX;
        self
    }

    /// The period, if it is usable for wrapping.
    fn period(&self) -> Option<f64> {
        self.x_period.filter(|p| p.is_finite() && *p > 0.0)
    }

    fn field(&self) -> LeafField {
        if self.flags.contains(SearchFlags::SEARCH_INDEX) {
            LeafField::SequenceId
        } else {
            LeafField::Payload
        }
    }
}

/// Which leaf attribute a traversal collects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LeafField {
    /// The stored payload.
    Payload,
    /// The insertion sequence id.
    SequenceId,
}

/// A value reported by a search or subtree walk.
#[derive(Debug, PartialEq, Eq)]
pub enum LeafValue<'a, P> {
    /// Borrowed payload of a leaf.
    Payload(&'a P),
    /// Insertion sequence id of a leaf.
    SequenceId(usize),
}

impl<P> Clone for LeafValue<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for LeafValue<'_, P> {}

impl<'a, P> LeafValue<'a, P> {
    /// The payload, if this value carries one.
    pub fn payload(self) -> Option<&'a P> {
        match self {
            Self::Payload(p) => Some(p),
            Self::SequenceId(_) => None,
        }
    }

    /// The sequence id, if this value carries one.
    pub fn sequence_id(self) -> Option<usize> {
        match self {
            Self::Payload(_) => None,
            Self::SequenceId(id) => Some(id),
        }
    }
}

impl<P> RTree<P> {
    /// Find leaves overlapping `boundary`.
    ///
    /// A subtree whose box lies inside the query is reported whole without
    /// further tests. Any other leaf reached through an overlapping parent is
    /// reported unless [`SearchFlags::INCLUDED_ONLY`] is set, in which case it
    /// is dropped. With an x period, the query is repeated at every offset
    /// `k * period` that can reach the tree's extent, and the results of all
    /// passes are concatenated (an item may appear once per pass that finds it).
    ///
    /// An empty tree yields an empty result.
    pub fn search(&self, boundary: Rect, options: &SearchOptions) -> Vec<LeafValue<'_, P>> {
        let mut out = Vec::new();
        if self.is_empty() {
            return out;
        }
        let included_only = options.flags.contains(SearchFlags::INCLUDED_ONLY);
        let field = options.field();
        match options.period() {
            None => self.search_at(&boundary, included_only, field, &mut out),
            Some(period) => {
                let offsets = self.wrap_offsets(&boundary, period);
                trace!(period, passes = offsets.len(), "periodic search");
                for dx in offsets {
                    self.search_at(&boundary.translate_x(dx), included_only, field, &mut out);
                }
            }
        }
        out
    }

    /// [`search`](Self::search), reporting payloads regardless of [`SearchFlags::SEARCH_INDEX`].
    pub fn search_payloads(&self, boundary: Rect, options: &SearchOptions) -> Vec<&P> {
        let mut options = *options;
        options.flags.remove(SearchFlags::SEARCH_INDEX);
        self.search(boundary, &options)
            .into_iter()
            .filter_map(LeafValue::payload)
            .collect()
    }

    /// [`search`](Self::search), reporting sequence ids regardless of [`SearchFlags::SEARCH_INDEX`].
    pub fn search_sequence_ids(&self, boundary: Rect, options: &SearchOptions) -> Vec<usize> {
        let options = options.search_index();
        self.search(boundary, &options)
            .into_iter()
            .filter_map(LeafValue::sequence_id)
            .collect()
    }

    /// Offsets `k * period` at which the shifted query can still meet the root box.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Wrap counts are small integers computed with ceil/floor."
    )]
    fn wrap_offsets(&self, boundary: &Rect, period: f64) -> Vec<f64> {
        let root = self.arena[self.root].bbox;
        let dx = root.x - boundary.x;
        let start = ceil((dx - boundary.width) / period);
        let end = floor((dx + root.width) / period);
        if !start.is_finite() || !end.is_finite() || end < start {
            return Vec::new();
        }
        (start as i64..=end as i64)
            .map(|k| k as f64 * period)
            .collect()
    }

    fn search_at<'a>(
        &'a self,
        query: &Rect,
        included_only: bool,
        field: LeafField,
        out: &mut Vec<LeafValue<'a, P>>,
    ) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if query.contains(&node.bbox) {
                self.arena.collect_subtree(id, field, out);
            } else if node.is_leaf() {
                if !included_only {
                    out.extend(node.leaf_value(field));
                }
            } else {
                stack.extend(
                    node.children
                        .iter()
                        .rev()
                        .copied()
                        .filter(|&c| self.arena[c].bbox.overlaps(query)),
                );
            }
        }
    }
}
