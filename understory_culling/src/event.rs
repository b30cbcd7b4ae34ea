// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications produced by the scheduler.
//!
//! The scheduler queues [`CullEvent`]s and the host drains them with
//! [`CullingScheduler::drain_events`](crate::CullingScheduler::drain_events).
//! Each scheduler call also returns a [`Changes`] summary so hosts that only
//! need to know "something moved" can skip the queue.

use crate::lod::DetailTier;

/// Counts reported after every visibility recompute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibilityChanged {
    /// Items known to the scheduler.
    pub total_count: usize,
    /// Items in the visible set.
    pub visible_count: usize,
    /// `total_count - visible_count`.
    pub culled_count: usize,
}

impl VisibilityChanged {
    pub(crate) fn new(total_count: usize, visible_count: usize) -> Self {
        Self {
            total_count,
            visible_count,
            culled_count: total_count.saturating_sub(visible_count),
        }
    }
}

/// The active detail tier changed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LodChanged {
    /// Newly active tier.
    pub tier: DetailTier,
    /// Tier that was active before.
    pub previous: DetailTier,
    /// Scale that triggered the change.
    pub scale: f64,
}

/// A queued notification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CullEvent {
    /// The visible set was recomputed.
    VisibilityChanged(VisibilityChanged),
    /// The detail tier changed.
    LodChanged(LodChanged),
}

bitflags::bitflags! {
    /// What a scheduler call changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Changes: u8 {
        /// The visible set was recomputed.
        const VISIBILITY = 0b0000_0001;
        /// The detail tier changed.
        const TIER       = 0b0000_0010;
    }
}
