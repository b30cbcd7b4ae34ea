// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The culling scheduler: the entry point hosts drive.
//!
//! The scheduler owns the item set, its spatial index, the viewport and LOD
//! trackers, and the current visible set. Hosts feed it viewport and item
//! changes with a millisecond timestamp; it never reads a clock.
//!
//! ## Throttling
//!
//! Viewport changes recompute at most once per `throttle_ms`. A change that lands
//! inside the window is coalesced into a pending recompute which fires on the
//! first [`poll`](CullingScheduler::poll) (or viewport change) after the window
//! elapses, so the last viewport is always rendered. Item changes and
//! [`force_recompute`](CullingScheduler::force_recompute) bypass the throttle.
//!
//! ```
//! use understory_culling::{Changes, CullEvent, CullingConfig, CullingScheduler, Item, ViewTransform};
//!
//! let mut s = CullingScheduler::new(CullingConfig::default().with_padding_px(0.0)).unwrap();
//! s.on_items_changed(vec![Item::bare(1_u32, 10.0, 10.0, 5.0, 5.0)], 0);
//!
//! // Outside the window opened by the item change: recomputes right away.
//! let changed = s.on_viewport_change(ViewTransform::IDENTITY, 100.0, 100.0, 20);
//! assert!(changed.contains(Changes::VISIBILITY));
//! assert!(s.is_visible(&1));
//!
//! // Inside the window: coalesced until a poll after the deadline.
//! let changed = s.on_viewport_change(ViewTransform::new(-500.0, 0.0, 1.0), 100.0, 100.0, 25);
//! assert!(changed.is_empty());
//! assert_eq!(s.next_deadline(), Some(36));
//! assert!(s.poll(36).contains(Changes::VISIBILITY));
//! assert!(!s.is_visible(&1));
//!
//! let events: Vec<CullEvent> = s.drain_events().collect();
//! assert_eq!(events.len(), 3);
//! ```

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::config::CullingConfig;
use crate::error::ConfigError;
use crate::event::{Changes, CullEvent, VisibilityChanged};
use crate::item::Item;
use crate::lod::{DetailTier, LodSelector, LodTracker};
use crate::viewport::{ViewTransform, Viewport, ViewportTracker};
use crate::visibility::{self, ItemIndex, Strategy};

/// Snapshot of the scheduler's counters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CullStats {
    /// Items known to the scheduler.
    pub total: usize,
    /// Items in the visible set.
    pub visible: usize,
    /// Items culled from the visible set.
    pub culled: usize,
    /// `culled / total`, or `0.0` without items.
    pub culling_rate: f64,
    /// Recomputes run since construction.
    pub recompute_count: u64,
    /// How the visible set is computed.
    pub strategy: Strategy,
    /// Active detail tier.
    pub tier: DetailTier,
}

/// Throttled viewport culling and LOD selection over a host-owned item set.
///
/// `K` is the item id type and `P` an optional per-item payload.
pub struct CullingScheduler<K, P = ()> {
    config: CullingConfig,
    items: Vec<Item<K, P>>,
    index: Option<ItemIndex>,
    tracker: ViewportTracker,
    lod: LodTracker,
    visible: Vec<usize>,
    last_recompute: Option<u64>,
    pending: bool,
    recompute_count: u64,
    events: Vec<CullEvent>,
}

impl<K, P> CullingScheduler<K, P> {
    /// Create a scheduler with no items and no viewport.
    ///
    /// Returns an error if `config` fails [`CullingConfig::validate`].
    pub fn new(config: CullingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let lod = LodTracker::new(LodSelector::new(config.lod_thresholds.clone())?);
        let tracker = ViewportTracker::new(config.padding_px);
        Ok(Self {
            config,
            items: Vec::new(),
            index: None,
            tracker,
            lod,
            visible: Vec::new(),
            last_recompute: None,
            pending: false,
            recompute_count: 0,
            events: Vec::new(),
        })
    }

    /// Report a pan/zoom change.
    ///
    /// Updates the viewport and detail tier immediately. The visible set is
    /// recomputed now if the throttle window has elapsed, otherwise on a later
    /// [`poll`](Self::poll).
    pub fn on_viewport_change(
        &mut self,
        transform: ViewTransform,
        canvas_width_px: f64,
        canvas_height_px: f64,
        now_ms: u64,
    ) -> Changes {
        let mut changes = Changes::empty();
        if let Some(vp) = self
            .tracker
            .update(transform, canvas_width_px, canvas_height_px)
        {
            if let Some(change) = self.lod.update(vp.scale) {
                self.events.push(CullEvent::LodChanged(change));
                changes |= Changes::TIER;
            }
        }
        if self.window_elapsed(now_ms) {
            changes |= self.recompute(now_ms);
        } else {
            log::trace!("viewport change at {now_ms} ms coalesced");
            self.pending = true;
        }
        changes
    }

    /// Replace the item set, rebuild the index and recompute immediately.
    pub fn on_items_changed(&mut self, items: Vec<Item<K, P>>, now_ms: u64) -> Changes {
        self.items = items;
        self.rebuild_index();
        self.recompute(now_ms)
    }

    /// Run a pending recompute if its throttle window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Changes {
        if self.pending && self.window_elapsed(now_ms) {
            self.recompute(now_ms)
        } else {
            Changes::empty()
        }
    }

    /// Timestamp at which a pending recompute becomes due, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        if !self.pending {
            return None;
        }
        Some(
            self.last_recompute
                .map_or(0, |t| t.saturating_add(self.config.throttle_ms)),
        )
    }

    /// Whether a coalesced viewport change is waiting for its window.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Recompute now, ignoring the throttle.
    pub fn force_recompute(&mut self, now_ms: u64) -> Changes {
        self.recompute(now_ms)
    }

    /// Turn culling on or off; a change recomputes immediately.
    pub fn set_culling_enabled(&mut self, enabled: bool, now_ms: u64) -> Changes {
        if self.config.culling_enabled == enabled {
            return Changes::empty();
        }
        self.config.culling_enabled = enabled;
        self.recompute(now_ms)
    }

    /// Change the screen-space padding; a change recomputes immediately.
    ///
    /// A negative or non-finite padding is treated as zero.
    pub fn set_padding_px(&mut self, padding_px: f64, now_ms: u64) -> Changes {
        let _ = self.tracker.set_padding_px(padding_px);
        let padding_px = self.tracker.padding_px();
        if padding_px == self.config.padding_px {
            return Changes::empty();
        }
        self.config.padding_px = padding_px;
        self.recompute(now_ms)
    }

    /// Items in the current visible set, in item order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item<K, P>> + '_ {
        self.visible.iter().filter_map(|&slot| self.items.get(slot))
    }

    /// Positions of visible items in [`items`](Self::items), ascending.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// The current item set.
    pub fn items(&self) -> &[Item<K, P>] {
        &self.items
    }

    /// Active detail tier.
    pub fn current_tier(&self) -> DetailTier {
        self.lod.current()
    }

    /// Current viewport, or `None` before the first valid viewport change.
    pub fn viewport(&self) -> Option<Viewport> {
        self.tracker.viewport()
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> alloc::vec::Drain<'_, CullEvent> {
        self.events.drain(..)
    }

    /// Counters describing the current visible set.
    pub fn stats(&self) -> CullStats {
        let total = self.items.len();
        let visible = self.visible.len();
        let culled = total.saturating_sub(visible);
        let culling_rate = if total == 0 {
            0.0
        } else {
            culled as f64 / total as f64
        };
        CullStats {
            total,
            visible,
            culled,
            culling_rate,
            recompute_count: self.recompute_count,
            strategy: self.strategy(),
            tier: self.lod.current(),
        }
    }

    /// How the visible set is computed for the current item set.
    pub fn strategy(&self) -> Strategy {
        if self.index.is_some() {
            Strategy::Indexed
        } else {
            Strategy::Linear
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &CullingConfig {
        &self.config
    }

    /// A timestamp earlier than the last recompute means the host clock was
    /// reset; the window counts as elapsed so nothing stays coalesced.
    fn window_elapsed(&self, now_ms: u64) -> bool {
        self.last_recompute.is_none_or(|t| {
            now_ms < t || now_ms - t >= self.config.throttle_ms
        })
    }

    fn rebuild_index(&mut self) {
        self.index = if self.config.use_spatial_index {
            ItemIndex::build(
                &self.items,
                self.config.world_bounds,
                self.config.quadtree_capacity,
                self.config.quadtree_max_depth,
            )
        } else {
            None
        };
        log::debug!(
            "rebuilt item set: {} items, strategy {:?}",
            self.items.len(),
            self.strategy()
        );
    }

    fn recompute(&mut self, now_ms: u64) -> Changes {
        self.visible = visibility::recompute(
            &self.items,
            self.index.as_ref(),
            self.tracker.viewport().as_ref(),
            self.config.culling_enabled,
        );
        self.last_recompute = Some(now_ms);
        self.pending = false;
        self.recompute_count += 1;
        let counts = VisibilityChanged::new(self.items.len(), self.visible.len());
        log::trace!(
            "recompute #{} at {now_ms} ms: {}/{} visible",
            self.recompute_count,
            counts.visible_count,
            counts.total_count
        );
        self.events.push(CullEvent::VisibilityChanged(counts));
        Changes::VISIBILITY
    }
}

impl<K: PartialEq, P> CullingScheduler<K, P> {
    /// Whether the item with `id` is in the current visible set.
    pub fn is_visible(&self, id: &K) -> bool {
        self.visible_items().any(|item| item.id == *id)
    }
}

impl<K, P> Debug for CullingScheduler<K, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CullingScheduler")
            .field("config", &self.config)
            .field("items", &self.items.len())
            .field("index", &self.index)
            .field("tracker", &self.tracker)
            .field("lod", &self.lod)
            .field("visible", &self.visible.len())
            .field("last_recompute", &self.last_recompute)
            .field("pending", &self.pending)
            .field("recompute_count", &self.recompute_count)
            .field("events", &self.events.len())
            .finish()
    }
}
