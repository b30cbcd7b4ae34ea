// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level-of-detail selection with a custom threshold table.
//!
//! Run:
//! - `cargo run -p understory_examples --example culling_lod_tiers`

use understory_culling::{DetailTier, LodSelector, LodThreshold, LodTracker};

fn main() {
    let selector = LodSelector::new(vec![
        LodThreshold::new(1.5, DetailTier::Full),
        LodThreshold::new(0.75, DetailTier::Medium),
        LodThreshold::new(0.1, DetailTier::Low),
    ])
    .expect("table is sorted and monotonic");

    for scale in [4.0, 1.5, 1.0, 0.75, 0.3, 0.05] {
        println!("scale {scale:>5.2} -> {:?}", selector.select(scale));
    }

    // A zoom gesture: only real tier changes are reported.
    let mut tracker = LodTracker::new(selector);
    for scale in [1.0, 1.2, 1.6, 2.0, 1.4, 0.9, 0.5, 0.2] {
        match tracker.update(scale) {
            Some(change) => println!("zoom {scale:.1}: {:?} -> {:?}", change.previous, change.tier),
            None => println!("zoom {scale:.1}: still {:?}", tracker.current()),
        }
    }

    // Tables that would make selection ambiguous are rejected up front.
    let err = LodSelector::new(vec![
        LodThreshold::new(0.5, DetailTier::Medium),
        LodThreshold::new(2.0, DetailTier::Full),
    ])
    .unwrap_err();
    println!("rejected: {err}");
}
