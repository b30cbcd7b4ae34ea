// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::Aabb2D;
use core::fmt::Debug;

/// Spatial backend abstraction over slot-addressed AABBs.
///
/// Backends are built by inserting every slot once and are rebuilt wholesale with
/// [`Backend::clear`] when the underlying data changes; there is no per-slot update.
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Insert a slot into the spatial structure.
    ///
    /// Returns `false` if the backend cannot store the box (for example because it
    /// lies outside a bounded backend's root region).
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) -> bool;

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Number of slots currently stored.
    fn len(&self) -> usize;

    /// True if no slots are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Query slots whose AABB contains the point.
    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Query slots whose AABB intersects the rectangle.
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;
}
