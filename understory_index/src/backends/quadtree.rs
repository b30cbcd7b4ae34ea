// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region quadtree backend generic over scalar `T: Scalar`.
//!
//! The tree covers a fixed root region and subdivides lazily: a node only splits
//! into four equal quadrants on the first insert that would push it past
//! `capacity`. Items that do not fit wholly inside one quadrant stay at the node
//! that contains them. Nodes at `max_depth` never split and accept any number of
//! items, which bounds recursion for pathological clustering (many boxes at the
//! same point) at the cost of a linear scan of that leaf.
//!
//! Nodes are never merged back. The tree is meant to be rebuilt from scratch with
//! [`QuadTree::clear`] whenever the item set changes.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar};

/// Errors reported when constructing a [`QuadTree`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum QuadTreeError {
    /// Root bounds must be finite with strictly positive width and height.
    #[error("quadtree bounds must be finite with positive width and height, got {0}")]
    InvalidBounds(alloc::string::String),
    /// A node must be able to hold at least one item.
    #[error("quadtree capacity must be at least 1")]
    ZeroCapacity,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const ROOT: Self = Self(0);

    const fn get(self) -> usize {
        self.0
    }
}

struct QuadNode<T, V> {
    bounds: Aabb2D<T>,
    depth: u32,
    items: Vec<(Aabb2D<T>, V)>,
    children: Option<[NodeIdx; 4]>,
}

impl<T, V> QuadNode<T, V> {
    fn leaf(bounds: Aabb2D<T>, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }
}

/// A region quadtree storing AABBs with a copyable value per entry.
///
/// `V` is usually a slot index into a caller-owned item list; the [`Backend`]
/// implementation is provided for `V = usize`.
///
/// ```
/// use understory_index::{Aabb2D, QuadTree};
///
/// let mut tree: QuadTree<f64, u32> =
///     QuadTree::new(Aabb2D::new(0.0, 0.0, 1000.0, 1000.0), 4, 8).unwrap();
/// assert!(tree.insert(Aabb2D::<f64>::from_xywh(10.0, 10.0, 5.0, 5.0), 7));
/// // Boxes outside the root region are rejected.
/// assert!(!tree.insert(Aabb2D::<f64>::from_xywh(990.0, 990.0, 20.0, 20.0), 8));
///
/// let hits = tree.retrieve(&Aabb2D::new(0.0, 0.0, 12.0, 12.0));
/// assert_eq!(hits, [7]);
/// ```
pub struct QuadTree<T: Scalar, V: Copy> {
    capacity: usize,
    max_depth: u32,
    len: usize,
    arena: Vec<QuadNode<T, V>>,
}

impl<T: Scalar, V: Copy> QuadTree<T, V> {
    /// Create an empty tree covering `bounds`.
    ///
    /// `bounds` must be finite with positive width and height.
    /// `capacity` is the number of items a node holds before it splits and must be
    /// at least 1. `max_depth` is the depth at which nodes stop splitting; `0`
    /// means the root never splits.
    pub fn new(bounds: Aabb2D<T>, capacity: usize, max_depth: u32) -> Result<Self, QuadTreeError> {
        if !bounds.is_finite() || !bounds.has_positive_area() {
            return Err(QuadTreeError::InvalidBounds(alloc::format!("{bounds:?}")));
        }
        if capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            max_depth,
            len: 0,
            arena: vec![QuadNode::leaf(bounds, 0)],
        })
    }

    /// Root region covered by the tree.
    pub fn bounds(&self) -> Aabb2D<T> {
        self.arena[NodeIdx::ROOT.get()].bounds
    }

    /// Per-node item budget before splitting.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depth at which nodes stop splitting.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Depth of the deepest node in the tree (`0` for an undivided root).
    pub fn depth(&self) -> u32 {
        self.arena.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Whether the root has been split into quadrants.
    pub fn is_divided(&self) -> bool {
        self.arena[NodeIdx::ROOT.get()].children.is_some()
    }

    /// Insert a box with its value.
    ///
    /// Returns `false` and stores nothing if the box is empty or not fully contained
    /// in the root bounds.
    pub fn insert(&mut self, aabb: Aabb2D<T>, value: V) -> bool {
        if aabb.is_empty() || !self.bounds().contains(&aabb) {
            return false;
        }
        let mut idx = NodeIdx::ROOT;
        loop {
            let node = &self.arena[idx.get()];
            if let Some(children) = node.children {
                match self.child_containing(children, &aabb) {
                    Some(child) => idx = child,
                    None => {
                        self.arena[idx.get()].items.push((aabb, value));
                        break;
                    }
                }
            } else if node.items.len() < self.capacity || node.depth >= self.max_depth {
                self.arena[idx.get()].items.push((aabb, value));
                break;
            } else {
                // Full leaf above max depth: split, then route the new item again.
                self.subdivide(idx);
            }
        }
        self.len += 1;
        true
    }

    /// Collect the values of every item whose box overlaps `range`.
    pub fn retrieve(&self, range: &Aabb2D<T>) -> Vec<V> {
        let mut out = Vec::new();
        self.retrieve_into(range, &mut out);
        out
    }

    /// Append the values of every item whose box overlaps `range` to `out`.
    ///
    /// Subtrees whose bounds miss `range` are skipped without visiting their items.
    pub fn retrieve_into(&self, range: &Aabb2D<T>, out: &mut Vec<V>) {
        if range.is_empty() {
            return;
        }
        let mut stack = vec![NodeIdx::ROOT];
        while let Some(idx) = stack.pop() {
            let node = &self.arena[idx.get()];
            if !node.bounds.overlaps(range) {
                continue;
            }
            out.extend(
                node.items
                    .iter()
                    .filter(|(bb, _)| bb.overlaps(range))
                    .map(|(_, v)| *v),
            );
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
    }

    /// Reset to a single empty root node, keeping bounds, capacity and depth limit.
    pub fn clear(&mut self) {
        self.arena.truncate(1);
        let root = &mut self.arena[NodeIdx::ROOT.get()];
        root.items.clear();
        root.children = None;
        self.len = 0;
    }

    fn child_containing(&self, children: [NodeIdx; 4], aabb: &Aabb2D<T>) -> Option<NodeIdx> {
        children
            .into_iter()
            .find(|c| self.arena[c.get()].bounds.contains(aabb))
    }

    fn subdivide(&mut self, idx: NodeIdx) {
        let (bounds, depth) = {
            let node = &self.arena[idx.get()];
            (node.bounds, node.depth)
        };
        let base = self.arena.len();
        for quadrant in bounds.quadrants() {
            self.arena.push(QuadNode::leaf(quadrant, depth + 1));
        }
        let children = [
            NodeIdx(base),
            NodeIdx(base + 1),
            NodeIdx(base + 2),
            NodeIdx(base + 3),
        ];
        let items = core::mem::take(&mut self.arena[idx.get()].items);
        let mut kept = Vec::new();
        for (bb, v) in items {
            match self.child_containing(children, &bb) {
                Some(child) => self.arena[child.get()].items.push((bb, v)),
                None => kept.push((bb, v)),
            }
        }
        let node = &mut self.arena[idx.get()];
        node.items = kept;
        node.children = Some(children);
    }
}

impl<T: Scalar, V: Copy> Debug for QuadTree<T, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds())
            .field("capacity", &self.capacity)
            .field("max_depth", &self.max_depth)
            .field("len", &self.len)
            .field("nodes", &self.arena.len())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> Backend<T> for QuadTree<T, usize> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) -> bool {
        Self::insert(self, aabb, slot)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        self.len
    }

    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.retrieve(&Aabb2D::new(x, y, x, y)).into_iter())
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.retrieve(&rect).into_iter())
    }
}

/// Quadtree with f32 coordinates.
pub type QuadTreeF32<V> = QuadTree<f32, V>;

/// Quadtree with f64 coordinates.
pub type QuadTreeF64<V> = QuadTree<f64, V>;

/// Quadtree with i64 coordinates.
pub type QuadTreeI64<V> = QuadTree<i64, V>;
