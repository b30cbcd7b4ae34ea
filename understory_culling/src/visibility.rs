// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-set computation.
//!
//! Two interchangeable strategies produce the same answer: a quadtree-backed
//! query ([`ItemIndex`]) and a linear scan over every item. Both test the same
//! closed-interval overlap against [`Viewport::padded_rect`], and both report
//! item positions in ascending order.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use kurbo::Rect;
use understory_index::{Aabb2D, QuadTreeF64};

use crate::item::{Item, rect_to_aabb};
use crate::viewport::Viewport;

/// How the last visible set was computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Quadtree query plus a scan of out-of-bounds items.
    Indexed,
    /// Overlap test against every item.
    Linear,
}

/// Quadtree over item positions, rebuilt wholesale for every new item set.
///
/// Items that do not fit inside the root bounds (only possible with configured
/// world bounds) are kept in an overflow list and scanned linearly on every query.
pub struct ItemIndex {
    tree: QuadTreeF64<usize>,
    overflow: Vec<usize>,
}

impl ItemIndex {
    /// Build an index over `items`.
    ///
    /// The root covers `world_bounds` when given, otherwise the union of all usable
    /// item boxes grown by one unit. Returns `None` when there is nothing to derive
    /// bounds from or the tree rejects its parameters; callers then fall back to a
    /// linear scan.
    pub fn build<K, P>(
        items: &[Item<K, P>],
        world_bounds: Option<Rect>,
        capacity: usize,
        max_depth: u32,
    ) -> Option<Self> {
        let root = match world_bounds {
            Some(bounds) => rect_to_aabb(bounds.abs()),
            None => {
                let union = items
                    .iter()
                    .filter_map(Item::aabb)
                    .reduce(|acc, bb| acc.union(&bb))?;
                Aabb2D::new(
                    union.min_x - 1.0,
                    union.min_y - 1.0,
                    union.max_x + 1.0,
                    union.max_y + 1.0,
                )
            }
        };
        let mut tree = match QuadTreeF64::new(root, capacity, max_depth) {
            Ok(tree) => tree,
            Err(err) => {
                log::warn!("spatial index unavailable, scanning linearly: {err}");
                return None;
            }
        };
        let mut overflow = Vec::new();
        for (slot, item) in items.iter().enumerate() {
            let Some(bb) = item.aabb() else {
                continue;
            };
            if !tree.insert(bb, slot) {
                overflow.push(slot);
            }
        }
        if !overflow.is_empty() {
            log::warn!(
                "{} items lie outside the world bounds {root:?}; scanning them linearly",
                overflow.len()
            );
        }
        log::debug!(
            "built item index: {} indexed, {} overflow, {} nodes, depth {}",
            tree.len(),
            overflow.len(),
            tree.node_count(),
            tree.depth()
        );
        Some(Self { tree, overflow })
    }

    /// The underlying quadtree.
    pub fn tree(&self) -> &QuadTreeF64<usize> {
        &self.tree
    }

    /// Positions of items stored outside the tree.
    pub fn overflow(&self) -> &[usize] {
        &self.overflow
    }

    /// Append the positions of items overlapping `region` to `out`, unsorted.
    fn query_into<K, P>(&self, items: &[Item<K, P>], region: &Aabb2D<f64>, out: &mut Vec<usize>) {
        self.tree.retrieve_into(region, out);
        out.extend(self.overflow.iter().copied().filter(|&slot| {
            items
                .get(slot)
                .and_then(Item::aabb)
                .is_some_and(|bb| bb.overlaps(region))
        }));
    }
}

impl Debug for ItemIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemIndex")
            .field("indexed", &self.tree.len())
            .field("overflow", &self.overflow.len())
            .field("tree", &self.tree)
            .finish()
    }
}

/// Positions of items overlapping the padded viewport, by linear scan.
pub fn recompute_linear<K, P>(items: &[Item<K, P>], viewport: &Viewport) -> Vec<usize> {
    let region = rect_to_aabb(viewport.padded_rect());
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.aabb().is_some_and(|bb| bb.overlaps(&region)))
        .map(|(slot, _)| slot)
        .collect()
}

/// Positions of items overlapping the padded viewport, through `index`.
///
/// `index` must have been built from `items`.
pub fn recompute_indexed<K, P>(
    items: &[Item<K, P>],
    index: &ItemIndex,
    viewport: &Viewport,
) -> Vec<usize> {
    let region = rect_to_aabb(viewport.padded_rect());
    let mut out = Vec::new();
    index.query_into(items, &region, &mut out);
    out.sort_unstable();
    out
}

/// Compute the visible set.
///
/// With culling disabled every position is returned. Otherwise an absent
/// viewport yields nothing, and the index is used when present.
pub fn recompute<K, P>(
    items: &[Item<K, P>],
    index: Option<&ItemIndex>,
    viewport: Option<&Viewport>,
    culling_enabled: bool,
) -> Vec<usize> {
    if !culling_enabled {
        return (0..items.len()).collect();
    }
    let Some(viewport) = viewport else {
        return Vec::new();
    };
    match index {
        Some(index) => recompute_indexed(items, index, viewport),
        None => recompute_linear(items, viewport),
    }
}
