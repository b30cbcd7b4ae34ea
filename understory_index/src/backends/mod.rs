// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple, exact oracle).
//! - `quadtree`: region quadtree with lazy subdivision over a fixed root region
//!   (aliases: `QuadTreeF32`, `QuadTreeF64`, `QuadTreeI64`).
//!
//! Both backends answer rectangle queries with the same closed-interval overlap
//! test ([`Aabb2D::overlaps`](crate::Aabb2D::overlaps)), so for the same inserted
//! boxes they return the same slot sets; only the cost differs.

pub mod flatvec;
pub mod quadtree;
