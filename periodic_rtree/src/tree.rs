// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree: incremental insertion with upward rebalancing and bulk loading.

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::hilbert::sort_by_hilbert_order;
use crate::node::{Arena, NodeId};
use crate::search::{LeafField, LeafValue};
use crate::types::Rect;

/// Node capacity used by [`RTree::default`].
pub const DEFAULT_MAX_NODES: usize = 8;

/// Dynamic R-tree over [`Rect`]s with payloads of type `P`.
///
/// Each leaf holds one payload and the sequence id it was inserted with.
/// Internal boxes only ever grow between splits.
pub struct RTree<P> {
    max_nodes: usize,
    count: usize,
    leaves: usize,
    pub(crate) root: NodeId,
    pub(crate) arena: Arena<P>,
}

impl<P> Default for RTree<P> {
    fn default() -> Self {
        Self::empty(DEFAULT_MAX_NODES)
    }
}

impl<P> RTree<P> {
    /// Create an empty tree whose nodes hold at most `max_nodes` children.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if `max_nodes <= 1`.
    pub fn new(max_nodes: usize) -> Result<Self> {
        if max_nodes <= 1 {
            return Err(Error::InvalidConfiguration { max_nodes });
        }
        Ok(Self::empty(max_nodes))
    }

    fn empty(max_nodes: usize) -> Self {
        let mut arena = Arena::with_capacity(1);
        let root = arena.alloc_empty();
        Self {
            max_nodes,
            count: 0,
            leaves: 0,
            root,
            arena,
        }
    }

    /// Maximum children per node.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Number of leaves currently in the tree.
    pub fn len(&self) -> usize {
        self.leaves
    }

    /// True when the tree holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.arena[self.root].is_leaf()
    }

    /// Total items ever handed to `insert` or `batch_insert` since the last
    /// `clear`; also the sequence id the next inserted item receives.
    pub fn insertion_count(&self) -> usize {
        self.count
    }

    /// Bounding box of everything in the tree, or `None` when empty.
    pub fn envelope(&self) -> Option<Rect> {
        (!self.is_empty()).then(|| self.arena[self.root].bbox)
    }

    /// Number of edges from the root down to the leaves (`0` when empty).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(&first) = self.arena[current].children.first() {
            height += 1;
            current = first;
        }
        height
    }

    /// Drop every entry and reset the sequence counter.
    pub fn clear(&mut self) {
        *self = Self::empty(self.max_nodes);
    }

    /// Insert one rectangle with its payload.
    ///
    /// Descends through the child whose box grows least (the first such child
    /// on ties), appends a leaf, then splits overflowing nodes on the way back
    /// up. A root overflow splits the root in place, adding a level.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeometry`] for negative or non-finite extents or a
    /// non-finite origin. The tree is unchanged in that case.
    pub fn insert(&mut self, rect: Rect, payload: P) -> Result<()> {
        let rect = rect.validated()?;
        let leaf = self.arena.alloc_leaf(rect, payload, self.count);
        let mut current = self.root;
        while !self.arena.has_leaf_nodes(current) {
            self.arena[current].bbox.grow_to_fit(&rect);
            current = self.choose_subtree(current, &rect);
        }
        self.arena.insert_child(current, leaf);
        self.count += 1;
        self.leaves += 1;
        self.balance_tree_path(leaf);
        Ok(())
    }

    /// Child of `node` with the least area growth for `rect`, leftmost on ties.
    fn choose_subtree(&self, node: NodeId, rect: &Rect) -> NodeId {
        let children = &self.arena[node].children;
        let mut best = children[0];
        let mut best_cost: Option<f64> = None;
        for &child in children {
            let cost = self.arena[child].bbox.area_if_grown_by(rect);
            if best_cost.map(|bc| cost < bc).unwrap_or(true) {
                best_cost = Some(cost);
                best = child;
            }
        }
        best
    }

    /// Split overflowing ancestors of `leaf`, bottom-up.
    fn balance_tree_path(&mut self, leaf: NodeId) {
        let mut current = self.arena[leaf].parent;
        while let Some(node) = current {
            if self.arena[node].children.len() <= self.max_nodes {
                break;
            }
            match self.arena[node].parent {
                Some(parent) => {
                    self.arena.remove_child(parent, node);
                    let (first, second) = self.arena.split_into_siblings(node);
                    trace!(
                        left = self.arena[first].children.len(),
                        right = self.arena[second].children.len(),
                        "split node"
                    );
                    self.arena.insert_child(parent, first);
                    self.arena.insert_child(parent, second);
                    self.arena.release(node);
                    current = Some(parent);
                }
                None => {
                    let (first, second) = self.arena.split_into_siblings(node);
                    self.arena.insert_child(node, first);
                    self.arena.insert_child(node, second);
                    debug!(height = self.height(), "root split, tree grew a level");
                    current = None;
                }
            }
        }
    }

    /// Replace the whole tree with a packed build of `items`.
    ///
    /// Items get sequence ids continuing from [`insertion_count`](Self::insertion_count)
    /// in input order, are sorted along the Hilbert curve, and are packed
    /// `max_nodes` at a time into parents, layer by layer, until a single root
    /// remains. Anything inserted before is discarded; use
    /// [`entries`](Self::entries) to carry it over.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeometry`] if any rectangle is invalid. The batch is
    /// validated up front, so the existing tree survives a failed call.
    pub fn batch_insert<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = (Rect, P)>,
    {
        let items = items
            .into_iter()
            .map(|(rect, payload)| rect.validated().map(|rect| (rect, payload)))
            .collect::<Result<Vec<_>>>()?;
        let len = items.len();
        let base = self.count;

        let mut arena = Arena::with_capacity(2 * len + 1);
        let mut layer: Vec<NodeId> = items
            .into_iter()
            .enumerate()
            .map(|(i, (rect, payload))| arena.alloc_leaf(rect, payload, base + i))
            .collect();
        sort_by_hilbert_order(&mut layer, |&id| arena[id].bbox.center());

        let root = if layer.is_empty() {
            arena.alloc_empty()
        } else {
            Self::pack_layers(&mut arena, layer, self.max_nodes)
        };
        self.arena = arena;
        self.root = root;
        self.count += len;
        self.leaves = len;
        debug!(
            items = len,
            height = self.height(),
            nodes = self.arena.live_nodes(),
            "bulk build"
        );
        Ok(())
    }

    /// Wrap groups of `max_nodes`, taken from the back of `layer`, into parents
    /// until one node remains.
    fn pack_layers(arena: &mut Arena<P>, mut layer: Vec<NodeId>, max_nodes: usize) -> NodeId {
        loop {
            let parents = layer.len().div_ceil(max_nodes);
            let mut next = Vec::with_capacity(parents);
            for _ in 0..parents {
                let parent = arena.alloc_empty();
                for _ in 0..max_nodes {
                    let Some(child) = layer.pop() else { break };
                    arena.insert_child(parent, child);
                }
                next.push(parent);
            }
            match next.as_slice() {
                [root] => return *root,
                _ => layer = next,
            }
        }
    }

    /// Every leaf as `(sequence_id, rect, payload)`, in tree pre-order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, Rect, &P)> + '_ {
        let mut out = Vec::with_capacity(self.leaves);
        let mut stack = alloc::vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if node.is_leaf() {
                if let (Some(seq), Some(payload)) = (node.sequence_id, node.payload.as_ref()) {
                    out.push((seq, node.bbox, payload));
                }
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out.into_iter()
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Bounding box of a node.
    pub fn node_bbox(&self, id: NodeId) -> Option<Rect> {
        self.arena.get(id).map(|n| n.bbox)
    }

    /// Children of a node, in stored order. Empty for leaves.
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.arena.get(id).map(|n| n.children.as_slice())
    }

    /// Parent of a node; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    /// Whether a node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(|n| n.is_leaf())
    }

    /// The requested attribute of a leaf, or `None` for internal or empty nodes.
    pub fn leaf_value(&self, id: NodeId, field: LeafField) -> Option<LeafValue<'_, P>> {
        self.arena
            .get(id)
            .filter(|n| n.is_leaf())
            .and_then(|n| n.leaf_value(field))
    }

    /// The requested attribute of every leaf under `id`, in pre-order.
    pub fn subtree_data(&self, id: NodeId, field: LeafField) -> Vec<LeafValue<'_, P>> {
        let mut out = Vec::new();
        if self.arena.get(id).is_some() {
            self.arena.collect_subtree(id, field, &mut out);
        }
        out
    }
}

impl<P> core::fmt::Debug for RTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_nodes", &self.max_nodes)
            .field("len", &self.leaves)
            .field("insertion_count", &self.count)
            .field("height", &self.height())
            .field("arena_nodes", &self.arena.live_nodes())
            .finish_non_exhaustive()
    }
}
