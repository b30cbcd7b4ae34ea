// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed world bounds, out-of-bounds items, and the linear strategy.
//!
//! Items placed outside the configured world are still culled correctly; they are
//! scanned linearly next to the quadtree query. The same scene run without the
//! spatial index produces the same visible set.
//!
//! Run:
//! - `RUST_LOG=warn cargo run -p understory_examples --example culling_world_bounds`

use kurbo::Rect;
use understory_culling::{CullingConfig, CullingScheduler, Item, ViewTransform};

fn scene() -> Vec<Item<&'static str, u8>> {
    vec![
        Item::from_rect("inside", Rect::new(100.0, 100.0, 140.0, 120.0), 1),
        Item::from_rect("straddles", Rect::new(990.0, 400.0, 1_030.0, 420.0), 2),
        Item::from_rect("far away", Rect::new(5_000.0, 5_000.0, 5_040.0, 5_020.0), 3),
        Item::unplaced("not laid out", 4),
    ]
}

fn main() {
    env_logger::init();

    let base = CullingConfig::default()
        .with_world_bounds(Rect::new(0.0, 0.0, 1_000.0, 1_000.0))
        .with_quadtree(4, 6);

    for indexed in [true, false] {
        let mut culler = CullingScheduler::new(base.clone().with_spatial_index(indexed))
            .expect("config is valid");
        let _ = culler.on_items_changed(scene(), 0);
        for (now, transform) in [
            (100, ViewTransform::IDENTITY),
            (200, ViewTransform::new(-600.0, -200.0, 1.0)),
            (300, ViewTransform::new(-2_400.0, -2_400.0, 0.5)),
        ] {
            let _ = culler.on_viewport_change(transform, 800.0, 600.0, now);
            let names: Vec<_> = culler.visible_items().map(|item| item.id).collect();
            let payloads: Vec<_> = culler.visible_items().map(|item| item.payload).collect();
            println!(
                "{:?} at {:?}: {names:?} payloads {payloads:?}",
                culler.strategy(),
                culler.viewport().map(|vp| vp.padded_rect()),
            );
        }
        let _ = culler.drain_events();
    }
}
