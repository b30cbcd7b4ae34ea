// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static configuration for a [`CullingScheduler`](crate::CullingScheduler).

use alloc::vec::Vec;
use kurbo::Rect;
use understory_index::QuadTreeF64;

use crate::error::ConfigError;
use crate::item::rect_to_aabb;
use crate::lod::{LodThreshold, default_thresholds, validate_thresholds};

/// Tuning knobs for culling, detail selection and throttling.
///
/// With the `serde` feature, missing fields take their [`Default`] values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CullingConfig {
    /// Pre-fetch margin around the viewport in screen pixels.
    pub padding_px: f64,
    /// When false, every item is always visible.
    pub culling_enabled: bool,
    /// LOD table, highest `min_scale` first.
    pub lod_thresholds: Vec<LodThreshold>,
    /// Items a quadtree node holds before splitting.
    pub quadtree_capacity: usize,
    /// Depth at which quadtree nodes stop splitting.
    pub quadtree_max_depth: u32,
    /// Minimum time between throttled recomputes, in milliseconds.
    pub throttle_ms: u64,
    /// Query through the quadtree; when false, scan every item.
    pub use_spatial_index: bool,
    /// Root region of the quadtree. `None` derives it from the items on each rebuild.
    pub world_bounds: Option<Rect>,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            padding_px: 100.0,
            culling_enabled: true,
            lod_thresholds: default_thresholds(),
            quadtree_capacity: 8,
            quadtree_max_depth: 8,
            throttle_ms: 16,
            use_spatial_index: true,
            world_bounds: None,
        }
    }
}

impl CullingConfig {
    /// Set the screen-space padding.
    pub fn with_padding_px(mut self, padding_px: f64) -> Self {
        self.padding_px = padding_px;
        self
    }

    /// Enable or disable culling.
    pub fn with_culling_enabled(mut self, enabled: bool) -> Self {
        self.culling_enabled = enabled;
        self
    }

    /// Replace the LOD table.
    pub fn with_lod_thresholds(mut self, thresholds: Vec<LodThreshold>) -> Self {
        self.lod_thresholds = thresholds;
        self
    }

    /// Set quadtree capacity and depth limit.
    pub fn with_quadtree(mut self, capacity: usize, max_depth: u32) -> Self {
        self.quadtree_capacity = capacity;
        self.quadtree_max_depth = max_depth;
        self
    }

    /// Set the throttle window.
    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    /// Choose between quadtree queries and linear scans.
    pub fn with_spatial_index(mut self, enabled: bool) -> Self {
        self.use_spatial_index = enabled;
        self
    }

    /// Fix the quadtree root region instead of deriving it from the items.
    pub fn with_world_bounds(mut self, bounds: Rect) -> Self {
        self.world_bounds = Some(bounds);
        self
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(ConfigError::InvalidPadding(self.padding_px));
        }
        if self.quadtree_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        validate_thresholds(&self.lod_thresholds)?;
        if let Some(bounds) = self.world_bounds {
            // Same root checks the index applies on every rebuild.
            QuadTreeF64::<usize>::new(
                rect_to_aabb(bounds.abs()),
                self.quadtree_capacity,
                self.quadtree_max_depth,
            )?;
        }
        Ok(())
    }
}
