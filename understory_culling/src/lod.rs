// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale-driven level-of-detail selection.
//!
//! ## Minimal example
//!
//! ```
//! use understory_culling::lod::{DetailTier, LodSelector, LodTracker};
//!
//! let selector = LodSelector::default();
//! assert_eq!(selector.select(2.5), DetailTier::Full);
//! assert_eq!(selector.select(1.0), DetailTier::Medium);
//! assert_eq!(selector.select(0.1), DetailTier::Low);
//!
//! let mut tracker = LodTracker::new(selector);
//! assert!(tracker.update(0.9).is_none()); // still Medium
//! assert_eq!(tracker.update(3.0).map(|c| c.tier), Some(DetailTier::Full));
//! assert!(tracker.update(4.0).is_none());
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::error::ConfigError;
use crate::event::LodChanged;

/// Rendering-detail tier, ordered from least to most detailed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetailTier {
    /// Bare shapes only.
    Low,
    /// Shapes with primary labels.
    Medium,
    /// Everything: icons, shadows, secondary text.
    Full,
}

/// One row of a LOD table: scales at or above `min_scale` select `tier`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LodThreshold {
    /// Smallest zoom factor this row applies to.
    pub min_scale: f64,
    /// Tier selected by this row.
    pub tier: DetailTier,
}

impl LodThreshold {
    /// Create a threshold row.
    pub const fn new(min_scale: f64, tier: DetailTier) -> Self {
        Self { min_scale, tier }
    }
}

/// The default table: `Full` from 2×, `Medium` from 0.5×, `Low` below that.
pub fn default_thresholds() -> Vec<LodThreshold> {
    vec![
        LodThreshold::new(2.0, DetailTier::Full),
        LodThreshold::new(0.5, DetailTier::Medium),
        LodThreshold::new(0.0, DetailTier::Low),
    ]
}

/// Check a LOD table: non-empty, finite, strictly descending `min_scale`, and tiers
/// that never get richer further down the table.
pub fn validate_thresholds(thresholds: &[LodThreshold]) -> Result<(), ConfigError> {
    if thresholds.is_empty() {
        return Err(ConfigError::EmptyLodTable);
    }
    for (index, t) in thresholds.iter().enumerate() {
        if !t.min_scale.is_finite() {
            return Err(ConfigError::NonFiniteThreshold { index });
        }
    }
    for (index, pair) in thresholds.windows(2).enumerate() {
        let (above, below) = (pair[0], pair[1]);
        if below.min_scale >= above.min_scale {
            return Err(ConfigError::UnsortedLodTable { index: index + 1 });
        }
        if below.tier > above.tier {
            return Err(ConfigError::NonMonotonicTiers { index: index + 1 });
        }
    }
    Ok(())
}

/// Maps a zoom factor to a [`DetailTier`] through a validated threshold table.
///
/// Rows are checked from the highest `min_scale` down and the first row with
/// `scale >= min_scale` wins. Scales below the last row, and NaN, fall back to the
/// last row's tier, so every scale selects exactly one tier.
#[derive(Clone, Debug, PartialEq)]
pub struct LodSelector {
    thresholds: Vec<LodThreshold>,
}

impl LodSelector {
    /// Build a selector, rejecting tables that would make selection ambiguous or
    /// non-monotonic.
    pub fn new(thresholds: Vec<LodThreshold>) -> Result<Self, ConfigError> {
        validate_thresholds(&thresholds)?;
        Ok(Self { thresholds })
    }

    /// Select the tier for `scale`.
    pub fn select(&self, scale: f64) -> DetailTier {
        self.thresholds
            .iter()
            .find(|t| scale >= t.min_scale)
            .or(self.thresholds.last())
            .map(|t| t.tier)
            .unwrap_or(DetailTier::Low)
    }

    /// The validated table, highest `min_scale` first.
    pub fn thresholds(&self) -> &[LodThreshold] {
        &self.thresholds
    }
}

impl Default for LodSelector {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
        }
    }
}

/// Remembers the active tier and reports only real transitions.
///
/// Starts at the tier for scale `1.0` (an unzoomed view), so a host that never
/// zooms never sees a change.
#[derive(Clone, Debug)]
pub struct LodTracker {
    selector: LodSelector,
    current: DetailTier,
}

impl LodTracker {
    /// Create a tracker positioned at the tier for scale `1.0`.
    pub fn new(selector: LodSelector) -> Self {
        let current = selector.select(1.0);
        Self { selector, current }
    }

    /// Feed a new scale; returns the transition if the tier changed.
    pub fn update(&mut self, scale: f64) -> Option<LodChanged> {
        let tier = self.selector.select(scale);
        if tier == self.current {
            return None;
        }
        let previous = core::mem::replace(&mut self.current, tier);
        log::debug!("detail tier {previous:?} -> {tier:?} at scale {scale}");
        Some(LodChanged {
            tier,
            previous,
            scale,
        })
    }

    /// The active tier.
    pub fn current(&self) -> DetailTier {
        self.current
    }

    /// The selector used for lookups.
    pub fn selector(&self) -> &LodSelector {
        &self.selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<LodThreshold> {
        vec![
            LodThreshold::new(2.0, DetailTier::Full),
            LodThreshold::new(0.5, DetailTier::Medium),
            LodThreshold::new(0.0, DetailTier::Low),
        ]
    }

    #[test]
    fn selects_first_matching_row() {
        let s = LodSelector::new(table()).unwrap();
        assert_eq!(s.select(2.5), DetailTier::Full);
        assert_eq!(s.select(2.0), DetailTier::Full);
        assert_eq!(s.select(1.0), DetailTier::Medium);
        assert_eq!(s.select(0.5), DetailTier::Medium);
        assert_eq!(s.select(0.1), DetailTier::Low);
        assert_eq!(s.select(0.0), DetailTier::Low);
    }

    #[test]
    fn below_table_minimum_and_nan_fall_back_to_last_row() {
        let s = LodSelector::new(vec![
            LodThreshold::new(1.0, DetailTier::Full),
            LodThreshold::new(0.25, DetailTier::Medium),
        ])
        .unwrap();
        assert_eq!(s.select(0.1), DetailTier::Medium);
        assert_eq!(s.select(f64::NAN), DetailTier::Medium);
        assert_eq!(s.select(-3.0), DetailTier::Medium);
    }

    #[test]
    fn selection_is_monotonic_in_scale() {
        let s = LodSelector::default();
        let mut prev = s.select(0.0);
        for step in 1..=4_000 {
            let scale = f64::from(step) * 0.001;
            let tier = s.select(scale);
            assert!(tier >= prev, "tier dropped at scale {scale}");
            prev = tier;
        }
    }

    #[test]
    fn rejects_bad_tables() {
        assert_eq!(LodSelector::new(Vec::new()), Err(ConfigError::EmptyLodTable));
        assert_eq!(
            LodSelector::new(vec![
                LodThreshold::new(0.5, DetailTier::Medium),
                LodThreshold::new(2.0, DetailTier::Full),
            ]),
            Err(ConfigError::UnsortedLodTable { index: 1 })
        );
        assert_eq!(
            LodSelector::new(vec![
                LodThreshold::new(1.0, DetailTier::Full),
                LodThreshold::new(1.0, DetailTier::Medium),
            ]),
            Err(ConfigError::UnsortedLodTable { index: 1 })
        );
        assert_eq!(
            LodSelector::new(vec![
                LodThreshold::new(2.0, DetailTier::Low),
                LodThreshold::new(0.0, DetailTier::Full),
            ]),
            Err(ConfigError::NonMonotonicTiers { index: 1 })
        );
        assert_eq!(
            LodSelector::new(vec![LodThreshold::new(f64::NAN, DetailTier::Low)]),
            Err(ConfigError::NonFiniteThreshold { index: 0 })
        );
    }

    #[test]
    fn tracker_fires_once_per_change() {
        let mut t = LodTracker::new(LodSelector::default());
        assert_eq!(t.current(), DetailTier::Medium);
        assert!(t.update(1.0).is_none());
        assert!(t.update(1.9).is_none());
        let up = t.update(2.0).unwrap();
        assert_eq!((up.previous, up.tier, up.scale), (DetailTier::Medium, DetailTier::Full, 2.0));
        assert!(t.update(8.0).is_none());
        assert!(t.update(2.0).is_none());
        let down = t.update(0.2).unwrap();
        assert_eq!((down.previous, down.tier), (DetailTier::Full, DetailTier::Low));
        assert_eq!(t.current(), DetailTier::Low);
    }
}
