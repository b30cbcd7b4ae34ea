// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_index::{Aabb2D, Backend, FlatVec, QuadTreeF64, QuadTreeI64};

const WORLD: f64 = 10_000.0;

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell * 0.5, cell * 0.5));
        }
    }
    out
}

fn gen_grid_rects_i64(n: usize, cell: i64) -> Vec<Aabb2D<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as i64 * cell;
            let y0 = y as i64 * cell;
            out.push(Aabb2D::<i64>::from_xywh(x0, y0, cell / 2, cell / 2));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_rects(count: usize, size: f64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (WORLD - size);
            let y0 = rng.next_f64() * (WORLD - size);
            Aabb2D::<f64>::from_xywh(x0, y0, size, size)
        })
        .collect()
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            spread + rng.next_f64() * (WORLD - 2.0 * spread),
            spread + rng.next_f64() * (WORLD - 2.0 * spread),
        ));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb2D::<f64>::from_xywh(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn world() -> Aabb2D<f64> {
    Aabb2D::new(0.0, 0.0, WORLD, WORLD)
}

fn fill_flat(rects: &[Aabb2D<f64>]) -> FlatVec<f64> {
    let mut flat = FlatVec::with_capacity(rects.len());
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = flat.insert(i, r);
    }
    flat
}

fn fill_tree(rects: &[Aabb2D<f64>], capacity: usize, max_depth: u32) -> QuadTreeF64<usize> {
    let mut tree = QuadTreeF64::new(world(), capacity, max_depth).unwrap();
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = tree.insert(r, i);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000, 50_000] {
        let rects = gen_uniform_rects(n, 12.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("flatvec_uniform_n{n}"), |b| {
            b.iter(|| black_box(fill_flat(&rects)));
        });
        group.bench_function(format!("quadtree_uniform_n{n}"), |b| {
            b.iter(|| black_box(fill_tree(&rects, 8, 8)));
        });
    }
    let rects = gen_clustered_rects(20, 500, 200.0);
    group.bench_function("quadtree_clustered_n10000", |b| {
        b.iter(|| black_box(fill_tree(&rects, 8, 8)));
    });
    group.finish();
}

fn bench_query_uniform(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_uniform_f64");
    let q = Aabb2D::<f64>::from_xywh(4_000.0, 4_000.0, 2_236.0, 2_236.0);
    for &n in &[1_000usize, 10_000, 50_000] {
        let rects = gen_uniform_rects(n, 12.0);
        let flat = fill_flat(&rects);
        let tree = fill_tree(&rects, 8, 8);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("flatvec_n{n}"), |b| {
            b.iter(|| black_box(flat.query_rect(q).count()));
        });
        group.bench_function(format!("quadtree_n{n}"), |b| {
            b.iter(|| black_box(tree.query_rect(q).count()));
        });
        group.bench_function(format!("quadtree_retrieve_into_n{n}"), |b| {
            b.iter_batched(
                || Vec::with_capacity(n / 10),
                |mut out| {
                    tree.retrieve_into(&q, &mut out);
                    black_box(out.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_query_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_clustered_f64");
    let rects = gen_clustered_rects(20, 500, 200.0);
    let flat = fill_flat(&rects);
    let q = Aabb2D::<f64>::from_xywh(2_000.0, 2_000.0, 3_000.0, 3_000.0);
    for &(capacity, max_depth) in &[(4usize, 6u32), (8, 8), (16, 10)] {
        let tree = fill_tree(&rects, capacity, max_depth);
        group.bench_function(format!("quadtree_c{capacity}_d{max_depth}"), |b| {
            b.iter(|| black_box(tree.query_rect(q).count()));
        });
    }
    group.bench_function("flatvec", |b| {
        b.iter(|| black_box(flat.query_rect(q).count()));
    });
    group.finish();
}

fn bench_query_grid_i64(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_grid_i64");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects_i64(n, 10);
        let extent = n as i64 * 10;
        let mut tree = QuadTreeI64::new(Aabb2D::new(0, 0, extent, extent), 8, 8).unwrap();
        for (i, r) in rects.iter().copied().enumerate() {
            let _ = tree.insert(r, i);
        }
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("quadtree_n{n}"), |b| {
            b.iter(|| black_box(tree.query_rect(Aabb2D::<i64>::from_xywh(100, 100, 100, 100)).count()));
        });
    }
    group.finish();
}

fn bench_point_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_point_f64");
    let rects = gen_grid_rects(128, 40.0);
    let flat = fill_flat(&rects);
    let tree = fill_tree(&rects, 8, 8);
    group.bench_function("flatvec", |b| {
        b.iter(|| black_box(flat.query_point(2_510.0, 2_510.0).count()));
    });
    group.bench_function("quadtree", |b| {
        b.iter(|| black_box(tree.query_point(2_510.0, 2_510.0).count()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_query_uniform,
    bench_query_clustered,
    bench_query_grid_i64,
    bench_point_queries,
);
criterion_main!(benches);
