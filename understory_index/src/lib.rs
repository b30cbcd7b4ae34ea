// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_index --heading-base-level=0

//! Understory Index: 2D AABB primitives and rectangle-query backends.
//!
//! Understory Index is a reusable building block for spatial queries over
//! axis-aligned bounding boxes (AABBs).
//!
//! - [`Aabb2D`]: closed, generic 2D box with containment and overlap tests.
//! - [`QuadTree`]: region quadtree with lazy subdivision, a per-node capacity and a
//!   hard depth limit.
//! - [`FlatVec`]: linear scan over all boxes; the exact reference the tree must agree with.
//! - [`Backend`]: slot-based trait implemented by both, so callers can swap strategies.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i64`) and does not depend on
//! any geometry crate. Higher layers (like a viewport culler) convert their own
//! rectangles into [`Aabb2D`] and keep payloads in their own storage, indexed by slot.
//!
//! Structures are built once and rebuilt from scratch when data changes. There is no
//! per-entry update or removal.
//!
//! # Example
//!
//! ```rust
//! use understory_index::{Aabb2D, QuadTree};
//!
//! // A 10k × 10k world, 4 items per node, at most 8 levels deep.
//! let mut tree: QuadTree<f64, usize> =
//!     QuadTree::new(Aabb2D::new(0.0, 0.0, 10_000.0, 10_000.0), 4, 8).unwrap();
//!
//! // Five boxes clustered in one spot force the root to split.
//! for slot in 0..5 {
//!     assert!(tree.insert(Aabb2D::<f64>::from_xywh(100.0, 100.0, 10.0, 10.0), slot));
//! }
//! assert!(tree.is_divided());
//!
//! let mut hits = tree.retrieve(&Aabb2D::new(0.0, 0.0, 200.0, 200.0));
//! hits.sort_unstable();
//! assert_eq!(hits, [0, 1, 2, 3, 4]);
//! ```
//!
//! Any backend can be driven through the [`Backend`] trait:
//!
//! ```rust
//! use understory_index::{Aabb2D, Backend, FlatVec, QuadTreeI64};
//!
//! fn fill(b: &mut dyn Backend<i64>) {
//!     for i in 0..16_i64 {
//!         let _ = b.insert(i as usize, Aabb2D::<i64>::from_xywh(i * 10, 0, 5, 5));
//!     }
//! }
//!
//! let mut flat: FlatVec<i64> = FlatVec::default();
//! let mut tree: QuadTreeI64<usize> = QuadTreeI64::new(Aabb2D::new(0, 0, 256, 256), 2, 6).unwrap();
//! fill(&mut flat);
//! fill(&mut tree);
//!
//! let q = Aabb2D::new(0, 0, 35, 5);
//! let mut a: Vec<_> = flat.query_rect(q).collect();
//! let mut b: Vec<_> = tree.query_rect(q).collect();
//! a.sort_unstable();
//! b.sort_unstable();
//! assert_eq!(a, b);
//! ```
//!
//! ## Choosing a backend
//!
//! - `FlatVec`: simplest and smallest, linear scans. Good for very small sets, and as
//!   a fallback when the world extent is unknown.
//! - `QuadTreeF32`/`QuadTreeF64`/`QuadTreeI64`: region quadtree. Expected
//!   O(log n + k) queries for roughly uniform data; degrades towards O(n) for heavy
//!   clustering, bounded by `max_depth`. The root region must cover every box you
//!   insert; boxes outside it are rejected.
//!
//! ### Float semantics
//!
//! Comparisons involving NaN are false, so a box with a NaN coordinate is neither
//! contained in nor overlapping anything. Callers should filter such boxes up front.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::{QuadTree, QuadTreeError, QuadTreeF32, QuadTreeF64, QuadTreeI64};
pub use types::{Aabb2D, Scalar};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn backends_agree_on_point_queries() {
        let mut flat: FlatVec<i64> = FlatVec::default();
        let mut tree: QuadTreeI64<usize> = QuadTree::new(Aabb2D::new(0, 0, 64, 64), 1, 4).unwrap();
        let boxes = [
            Aabb2D::new(0, 0, 10, 10),
            Aabb2D::new(5, 5, 15, 15),
            Aabb2D::new(30, 30, 34, 34),
            Aabb2D::new(31, 0, 33, 64),
        ];
        for (slot, bb) in boxes.iter().enumerate() {
            assert!(Backend::insert(&mut flat, slot, *bb));
            assert!(Backend::insert(&mut tree, slot, *bb));
        }
        for (x, y) in [(6, 6), (32, 32), (32, 1), (63, 63), (10, 10)] {
            let mut a: Vec<_> = flat.query_point(x, y).collect();
            let mut b: Vec<_> = tree.query_point(x, y).collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b, "point ({x}, {y})");
        }
    }

    #[test]
    fn rejected_insert_is_not_counted() {
        let mut tree: QuadTreeF64<usize> =
            QuadTree::new(Aabb2D::new(0.0, 0.0, 10.0, 10.0), 4, 2).unwrap();
        assert!(!Backend::insert(&mut tree, 0, Aabb2D::<f64>::from_xywh(20.0, 20.0, 1.0, 1.0)));
        assert!(Backend::is_empty(&tree));
    }
}
