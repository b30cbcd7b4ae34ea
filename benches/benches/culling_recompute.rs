// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_culling::{CullingConfig, CullingScheduler, Item, ViewTransform};

const WORLD: f64 = 10_000.0;

struct Rng(u64);

impl Rng {
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

fn gen_items(n: usize) -> Vec<Item<u32>> {
    let mut rng = Rng(0x5EED_0F_CA11_1E55);
    (0..n as u32)
        .map(|id| {
            let x = rng.next_f64() * (WORLD - 40.0);
            let y = rng.next_f64() * (WORLD - 40.0);
            Item::bare(id, x, y, 40.0, 24.0)
        })
        .collect()
}

fn scheduler(items: &[Item<u32>], indexed: bool) -> CullingScheduler<u32> {
    let config = CullingConfig::default()
        .with_spatial_index(indexed)
        .with_throttle_ms(0);
    let mut s = CullingScheduler::new(config).unwrap();
    let _ = s.on_items_changed(items.to_vec(), 0);
    s
}

fn bench_items_changed(c: &mut Criterion) {
    let mut group = c.benchmark_group("items_changed");
    for &n in &[1_000usize, 10_000] {
        let items = gen_items(n);
        group.throughput(Throughput::Elements(n as u64));
        for indexed in [true, false] {
            let name = if indexed { "indexed" } else { "linear" };
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter_batched(
                    || (scheduler(&[], indexed), items.clone()),
                    |(mut s, items)| {
                        let _ = s.on_items_changed(items, 1);
                        black_box(s.visible_indices().len());
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("pan_1080p");
    for &n in &[1_000usize, 10_000, 50_000] {
        let items = gen_items(n);
        group.throughput(Throughput::Elements(n as u64));
        for indexed in [true, false] {
            let name = if indexed { "indexed" } else { "linear" };
            let mut s = scheduler(&items, indexed);
            let mut now = 1_u64;
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter(|| {
                    now += 1;
                    let dx = -((now % 400) as f64) * 20.0;
                    let _ = s.on_viewport_change(ViewTransform::new(dx, -2_000.0, 1.0), 1_920.0, 1_080.0, now);
                    black_box(s.visible_indices().len());
                    let _ = s.drain_events().count();
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_items_changed, bench_pan);
criterion_main!(benches);
