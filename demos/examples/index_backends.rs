// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive the spatial index directly: a quadtree and a linear scan behind the
//! same `Backend` trait, answering the same window queries.
//!
//! Run:
//! - `cargo run -p understory_examples --example index_backends`

use kurbo::Rect;
use understory_index::{Aabb2D, Backend, FlatVec, QuadTreeF64};

fn to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

fn main() {
    // A graph-like scene: a dense cluster plus a sparse ring of nodes.
    let mut rects = Vec::new();
    for i in 0..200_u32 {
        let x = 400.0 + f64::from(i % 20) * 12.0;
        let y = 400.0 + f64::from(i / 20) * 12.0;
        rects.push(Rect::new(x, y, x + 10.0, y + 10.0));
    }
    for i in 0..40_u32 {
        let x = f64::from(i) * 50.0;
        rects.push(Rect::new(x, 1_900.0, x + 30.0, 1_930.0));
    }

    let world = to_aabb(Rect::new(0.0, 0.0, 2_048.0, 2_048.0));
    let mut tree: QuadTreeF64<usize> = QuadTreeF64::new(world, 8, 6).expect("world has area");
    let mut flat: FlatVec<f64> = FlatVec::with_capacity(rects.len());
    for backend in [&mut tree as &mut dyn Backend<f64>, &mut flat] {
        for (slot, r) in rects.iter().enumerate() {
            let _ = backend.insert(slot, to_aabb(*r));
        }
    }
    println!("{tree:?} depth={}", tree.depth());

    for window in [
        Rect::new(380.0, 380.0, 460.0, 460.0),
        Rect::new(0.0, 1_800.0, 400.0, 2_000.0),
        Rect::new(1_000.0, 0.0, 1_500.0, 300.0),
    ] {
        let mut a: Vec<_> = tree.query_rect(to_aabb(window)).collect();
        let mut b: Vec<_> = flat.query_rect(to_aabb(window)).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
        println!("window {window:?}: {} hits", a.len());
    }

    // Data changed: rebuild from scratch.
    tree.clear();
    let _ = tree.insert(to_aabb(Rect::new(10.0, 10.0, 20.0, 20.0)), 0);
    println!("after rebuild: {:?}", tree.retrieve(&world));
}
