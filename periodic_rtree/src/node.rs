// Copyright 2025 the Periodic R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed tree nodes.
//!
//! The arena owns every node. Children are listed by [`NodeId`], and the
//! parent link is a plain index used only to walk upward while rebalancing.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::hilbert::sort_by_hilbert_order;
use crate::search::{LeafField, LeafValue};
use crate::types::Rect;

/// Handle to a node inside an [`RTree`](crate::RTree).
///
/// Handles are positions in the tree's arena. Any mutation of the tree may
/// split, discard, or recycle nodes, so a handle is only meaningful until the
/// next `insert`, `batch_insert`, or `clear`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<P> {
    pub(crate) bbox: Rect,
    pub(crate) payload: Option<P>,
    pub(crate) sequence_id: Option<usize>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl<P> Node<P> {
    fn empty() -> Self {
        Self {
            bbox: Rect::UNSET,
            payload: None,
            sequence_id: None,
            parent: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn leaf_value(&self, field: LeafField) -> Option<LeafValue<'_, P>> {
        match field {
            LeafField::Payload => self.payload.as_ref().map(LeafValue::Payload),
            LeafField::SequenceId => self.sequence_id.map(LeafValue::SequenceId),
        }
    }
}

pub(crate) struct Arena<P> {
    nodes: Vec<Node<P>>,
    free_list: Vec<usize>,
}

impl<P> Index<NodeId> for Arena<P> {
    type Output = Node<P>;

    fn index(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.get()]
    }
}

impl<P> IndexMut<NodeId> for Arena<P> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.nodes[id.get()]
    }
}

impl<P> Arena<P> {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.get())
    }

    /// Nodes currently allocated, recycled slots excluded.
    pub(crate) fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    fn alloc(&mut self, node: Node<P>) -> NodeId {
        if let Some(i) = self.free_list.pop() {
            self.nodes[i] = node;
            NodeId::new(i)
        } else {
            self.nodes.push(node);
            NodeId::new(self.nodes.len() - 1)
        }
    }

    /// Allocate a childless node with the unset box.
    pub(crate) fn alloc_empty(&mut self) -> NodeId {
        self.alloc(Node::empty())
    }

    pub(crate) fn alloc_leaf(&mut self, bbox: Rect, payload: P, sequence_id: usize) -> NodeId {
        self.alloc(Node {
            bbox,
            payload: Some(payload),
            sequence_id: Some(sequence_id),
            parent: None,
            children: Vec::new(),
        })
    }

    /// Return a discarded node's slot to the free list.
    pub(crate) fn release(&mut self, id: NodeId) {
        self.nodes[id.get()] = Node::empty();
        self.free_list.push(id.get());
    }

    /// A leaf, or a node whose first child is a leaf.
    ///
    /// All leaves sit at the same depth, so the first child speaks for the rest.
    pub(crate) fn has_leaf_nodes(&self, id: NodeId) -> bool {
        match self[id].children.first() {
            None => true,
            Some(&first) => self[first].is_leaf(),
        }
    }

    /// Append `child`, point it back at `parent`, and grow `parent` to cover it.
    pub(crate) fn insert_child(&mut self, parent: NodeId, child: NodeId) {
        let bbox = self[child].bbox;
        self[child].parent = Some(parent);
        let node = &mut self[parent];
        node.children.push(child);
        node.bbox.grow_to_fit(&bbox);
    }

    /// Drop `child` from `parent`'s list. The parent's box is left as is.
    pub(crate) fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self[parent].children;
        if let Some(pos) = children.iter().position(|&c| c == child) {
            children.remove(pos);
        }
    }

    /// Hand this node's children to two fresh siblings.
    ///
    /// Children are ordered along the Hilbert curve; positions `0..=len/2` go to
    /// the first sibling and the rest to the second. The node is left without
    /// children; detaching and releasing it is up to the caller.
    pub(crate) fn split_into_siblings(&mut self, id: NodeId) -> (NodeId, NodeId) {
        let mut children = core::mem::take(&mut self[id].children);
        sort_by_hilbert_order(&mut children, |&c| self[c].bbox.center());
        let pivot = children.len() / 2;
        let first = self.alloc_empty();
        let second = self.alloc_empty();
        for (i, child) in children.into_iter().enumerate() {
            let sibling = if i <= pivot { first } else { second };
            self.insert_child(sibling, child);
        }
        (first, second)
    }

    /// Leaf values under `id` in pre-order.
    pub(crate) fn collect_subtree<'a>(
        &'a self,
        id: NodeId,
        field: LeafField,
        out: &mut Vec<LeafValue<'a, P>>,
    ) {
        let mut stack = vec![id];
        while let Some(i) = stack.pop() {
            let node = &self[i];
            if node.is_leaf() {
                out.extend(node.leaf_value(field));
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }
}
