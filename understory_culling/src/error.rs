// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Only construction can fail. Per-frame input (odd transforms, items without a
//! usable position) never produces an error; it degrades to an empty or partial
//! visible set instead.

use understory_index::QuadTreeError;

/// A configuration value was rejected when building a culling component.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The quadtree node capacity was zero.
    #[error("quadtree capacity must be at least 1")]
    ZeroCapacity,
    /// Screen-space padding was negative or not finite.
    #[error("padding must be a finite, non-negative pixel count, got {0}")]
    InvalidPadding(f64),
    /// The LOD threshold table had no entries.
    #[error("level-of-detail table must contain at least one threshold")]
    EmptyLodTable,
    /// A LOD threshold had a NaN or infinite `min_scale`.
    #[error("level-of-detail threshold {index} has a non-finite min_scale")]
    NonFiniteThreshold {
        /// Position of the offending entry.
        index: usize,
    },
    /// LOD thresholds were not sorted by strictly descending `min_scale`.
    #[error(
        "level-of-detail thresholds must be sorted by strictly descending min_scale (entry {index})"
    )]
    UnsortedLodTable {
        /// Position of the first entry that is not below its predecessor.
        index: usize,
    },
    /// A lower threshold mapped to a richer tier than the one above it.
    #[error("level-of-detail tiers must not get richer as min_scale decreases (entry {index})")]
    NonMonotonicTiers {
        /// Position of the first entry with a richer tier than its predecessor.
        index: usize,
    },
    /// The configured world bounds were rejected by the spatial index.
    #[error(transparent)]
    WorldBounds(#[from] QuadTreeError),
}
