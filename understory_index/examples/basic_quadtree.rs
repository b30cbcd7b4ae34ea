// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of the quadtree backend: build, query, clear and rebuild.

use understory_index::{Aabb2D, QuadTree};

fn main() {
    let mut tree: QuadTree<f64, u32> =
        QuadTree::new(Aabb2D::new(0.0, 0.0, 1024.0, 1024.0), 4, 6).expect("valid bounds");
    for i in 0..64_u32 {
        let x = f64::from(i % 8) * 128.0 + 8.0;
        let y = f64::from(i / 8) * 128.0 + 8.0;
        let _ = tree.insert(Aabb2D::<f64>::from_xywh(x, y, 32.0, 32.0), i);
    }
    println!("{tree:?} depth={}", tree.depth());

    // Query a window in the top-left corner.
    let hits = tree.retrieve(&Aabb2D::new(0.0, 0.0, 300.0, 300.0));
    println!("hits in window: {hits:?}");

    // Rebuild from scratch after a data change.
    tree.clear();
    let _ = tree.insert(Aabb2D::<f64>::from_xywh(500.0, 500.0, 10.0, 10.0), 99);
    println!("after rebuild: {:?}", tree.retrieve(&Aabb2D::new(0.0, 0.0, 1024.0, 1024.0)));
}
