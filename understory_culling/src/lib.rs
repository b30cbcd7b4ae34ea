// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_culling --heading-base-level=0

//! Understory Culling: viewport culling and level-of-detail selection for large 2D scenes.
//!
//! Given many positioned, axis-aligned items and a pan/zoom viewport that changes
//! on every frame, this crate decides which items are visible and at which
//! rendering-detail tier, so a renderer only draws what is on screen.
//!
//! - [`Item`]: an id, a world-space box and an optional payload.
//! - [`ViewportTracker`]: inverts a pan/zoom [`ViewTransform`] into a padded
//!   world-space [`Viewport`]. Padding is constant in screen pixels.
//! - [`LodSelector`] / [`LodTracker`]: maps zoom scale to a [`DetailTier`] and
//!   reports transitions.
//! - [`visibility`]: the visible-set query, by quadtree ([`ItemIndex`]) or by a
//!   linear scan. Both strategies always agree.
//! - [`CullingScheduler`]: owns all of the above, throttles recomputes with a
//!   trailing edge, and queues [`CullEvent`]s for the host.
//!
//! The spatial index comes from [`understory_index`]. It is rebuilt from scratch
//! whenever the host hands over a new item set.
//!
//! # Example
//!
//! ```rust
//! use understory_culling::{
//!     CullEvent, CullingConfig, CullingScheduler, DetailTier, Item, ViewTransform,
//! };
//!
//! let config = CullingConfig::default().with_padding_px(0.0);
//! let mut culler = CullingScheduler::new(config).unwrap();
//!
//! // A row of 100 nodes, 50 units apart.
//! let items: Vec<_> = (0..100_u32)
//!     .map(|i| Item::bare(i, f64::from(i) * 50.0, 0.0, 20.0, 20.0))
//!     .collect();
//! culler.on_items_changed(items, 0);
//!
//! // Zoom to 2x on an 800 x 600 canvas: the view spans 400 world units.
//! culler.on_viewport_change(ViewTransform::new(0.0, 0.0, 2.0), 800.0, 600.0, 100);
//! assert_eq!(culler.current_tier(), DetailTier::Full);
//! assert_eq!(culler.visible_items().count(), 9);
//!
//! for event in culler.drain_events() {
//!     match event {
//!         CullEvent::VisibilityChanged(v) => assert_eq!(v.total_count, 100),
//!         CullEvent::LodChanged(c) => assert_eq!(c.tier, DetailTier::Full),
//!     }
//! }
//! ```
//!
//! ## Time
//!
//! Nothing here reads a clock. Every scheduler call takes a millisecond
//! timestamp from the host; call [`CullingScheduler::poll`] at or after
//! [`CullingScheduler::next_deadline`] (for example, once per frame) so a
//! throttled viewport change is eventually rendered.
//!
//! ## Features
//!
//! - `std` (default) and `libm` select Kurbo's float backend.
//! - `serde` derives `Serialize`/`Deserialize` for [`CullingConfig`],
//!   [`LodThreshold`], [`DetailTier`] and [`ViewTransform`].
//!
//! Logging goes through the [`log`](https://docs.rs/log) facade; install any
//! logger to see index rebuilds (`debug`) and throttling decisions (`trace`).

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod event;
pub mod item;
pub mod lod;
pub mod scheduler;
pub mod viewport;
pub mod visibility;

pub use config::CullingConfig;
pub use error::ConfigError;
pub use event::{Changes, CullEvent, LodChanged, VisibilityChanged};
pub use item::Item;
pub use lod::{DetailTier, LodSelector, LodThreshold, LodTracker, default_thresholds};
pub use scheduler::{CullStats, CullingScheduler};
pub use viewport::{ViewTransform, Viewport, ViewportTracker};
pub use visibility::{ItemIndex, Strategy};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn scheduler_is_send_for_send_items() {
        fn assert_send<T: Send>() {}
        assert_send::<CullingScheduler<u64, Vec<u8>>>();
    }

    #[test]
    fn row_of_items_at_two_x_zoom() {
        let mut culler = CullingScheduler::new(CullingConfig::default().with_padding_px(0.0)).unwrap();
        let items: Vec<_> = (0..100_u32)
            .map(|i| Item::bare(i, f64::from(i) * 50.0, 0.0, 20.0, 20.0))
            .collect();
        let _ = culler.on_items_changed(items, 0);
        let changes = culler.on_viewport_change(ViewTransform::new(0.0, 0.0, 2.0), 800.0, 600.0, 100);
        assert_eq!(changes, Changes::TIER | Changes::VISIBILITY);
        // View is (0,0)-(400,300); the item at x = 400 touches the right edge.
        let ids: Vec<u32> = culler.visible_items().map(|item| item.id).collect();
        assert_eq!(ids, (0..=8).collect::<Vec<_>>());
        let stats = culler.stats();
        assert_eq!(stats.culled, 91);
        assert_eq!(stats.recompute_count, 2);
        assert_eq!(stats.tier, DetailTier::Full);
    }
}
