// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated pan/zoom session over a large graph.
//!
//! Feeds a burst of viewport changes at 4 ms intervals into the scheduler and
//! polls once per 16 ms frame, printing what the renderer would be told.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_examples --example culling_pan_zoom`

use understory_culling::{CullEvent, CullingConfig, CullingScheduler, Item, ViewTransform};

const CANVAS_W: f64 = 1280.0;
const CANVAS_H: f64 = 720.0;

fn main() {
    env_logger::init();

    // 100 x 100 nodes on a 100-unit pitch.
    let items: Vec<Item<u32>> = (0..10_000_u32)
        .map(|i| Item::bare(i, f64::from(i % 100) * 100.0, f64::from(i / 100) * 100.0, 60.0, 30.0))
        .collect();

    let mut culler = CullingScheduler::new(CullingConfig::default()).expect("default config is valid");
    let _ = culler.on_items_changed(items, 0);

    // Pan right while zooming out, one input event every 4 ms.
    let mut now = 0_u64;
    for step in 0..60_u32 {
        now += 4;
        let scale = 2.0 - f64::from(step) * 0.03;
        let transform = ViewTransform::new(-f64::from(step) * 40.0, 0.0, scale);
        let _ = culler.on_viewport_change(transform, CANVAS_W, CANVAS_H, now);
        if now % 16 == 0 {
            let _ = culler.poll(now);
            report(&mut culler, now);
        }
    }

    // Input stopped: the last viewport still gets rendered.
    if let Some(deadline) = culler.next_deadline() {
        let _ = culler.poll(deadline);
        report(&mut culler, deadline);
    }

    let stats = culler.stats();
    println!(
        "final: {} of {} visible ({:.1}% culled), tier {:?}, {} recomputes via {:?}",
        stats.visible,
        stats.total,
        stats.culling_rate * 100.0,
        stats.tier,
        stats.recompute_count,
        stats.strategy,
    );
}

fn report(culler: &mut CullingScheduler<u32>, now: u64) {
    for event in culler.drain_events() {
        match event {
            CullEvent::VisibilityChanged(v) => println!(
                "[{now:>4} ms] visible {:>5} / {} (culled {})",
                v.visible_count, v.total_count, v.culled_count
            ),
            CullEvent::LodChanged(c) => println!(
                "[{now:>4} ms] tier {:?} -> {:?} at scale {:.2}",
                c.previous, c.tier, c.scale
            ),
        }
    }
}
