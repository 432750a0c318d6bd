// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strata_index::{IndexedRangeHeap, Point3d, Range3d};
use strata_polyline::{
    CloseApproachOptions, PolylineRanges, SearchStrategy, add_close_approaches, closest_approach,
    collect_intersections_and_close_approaches_xy,
};

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

/// A wandering polyline of `n` points with steps of at most `step` per axis.
fn gen_walk(rng: &mut Rng, n: usize, origin: Point3d, step: f64) -> Vec<Point3d> {
    let mut out = Vec::with_capacity(n);
    let mut p = origin;
    for _ in 0..n {
        out.push(p);
        p = Point3d::new(
            p.x + (rng.next_f64() - 0.5) * 2.0 * step,
            p.y + (rng.next_f64() - 0.5) * 2.0 * step,
            p.z + (rng.next_f64() - 0.5) * 2.0 * step,
        );
    }
    out
}

/// A zigzag along x, so nearby polylines approach in many places.
fn gen_zigzag(n: usize, y: f64, amplitude: f64) -> Vec<Point3d> {
    (0..n)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            Point3d::new(i as f64, y + sign * amplitude, 0.0)
        })
        .collect()
}

fn strategies() -> [(&'static str, CloseApproachOptions); 2] {
    [
        (
            "heap",
            CloseApproachOptions::with_strategy(SearchStrategy::Heap),
        ),
        (
            "brute",
            CloseApproachOptions::with_strategy(SearchStrategy::BruteForce),
        ),
    ]
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_3d");
    for &n in &[16_usize, 128, 1024] {
        let mut rng = Rng::new(0x00C0_FFEE_u64 + n as u64);
        let a = gen_walk(&mut rng, n, Point3d::ZERO, 1.0);
        let b = gen_walk(&mut rng, n, Point3d::new(3.0, 3.0, 0.0), 1.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        for (name, options) in strategies() {
            group.bench_function(format!("{name}_n{n}"), |bench| {
                bench.iter(|| {
                    let hits = add_close_approaches(&a, None, &b, None, 0.5, &options);
                    black_box(hits.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_collect_xy(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_xy_zigzag");
    for &n in &[64_usize, 512] {
        let a = gen_zigzag(n, 0.0, 1.0);
        let b = gen_zigzag(n, 1.5, 1.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        for (name, options) in strategies() {
            group.bench_function(format!("{name}_n{n}"), |bench| {
                bench.iter(|| {
                    let hits = collect_intersections_and_close_approaches_xy(
                        &a, None, &b, None, 0.0, &options,
                    );
                    black_box(hits.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_3d");
    for &n in &[128_usize, 1024] {
        let mut rng = Rng::new(0xBADC_0DE_u64 + n as u64);
        let a = gen_walk(&mut rng, n, Point3d::ZERO, 1.0);
        let b = gen_walk(&mut rng, n, Point3d::new(40.0, 0.0, 0.0), 1.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        for (name, options) in strategies() {
            group.bench_function(format!("{name}_n{n}"), |bench| {
                bench.iter(|| black_box(closest_approach(&a, None, &b, None, &options)));
            });
        }
    }
    group.finish();
}

fn bench_heap_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_build");
    for &n in &[1024_usize, 16384] {
        let mut rng = Rng::new(7 + n as u64);
        let points = gen_walk(&mut rng, n, Point3d::ZERO, 1.0);
        group.throughput(Throughput::Elements(n as u64));
        for bf in [2_usize, 4, 8] {
            group.bench_function(format!("bf{bf}_n{n}"), |bench| {
                bench.iter_batched(
                    || PolylineRanges::new(&points),
                    |ranges| {
                        let heap = IndexedRangeHeap::build(bf, &ranges, 0, n - 2, false);
                        black_box(heap.map(|h| h.node_count()));
                    },
                    BatchSize::SmallInput,
                );
            });
        }
        let probe = Range3d::from_corners([-2.0, -2.0, -2.0], [2.0, 2.0, 2.0]);
        let heap = IndexedRangeHeap::build(2, &PolylineRanges::new(&points), 0, n - 2, false);
        group.bench_function(format!("collect_in_range_n{n}"), |bench| {
            bench.iter(|| black_box(heap.as_ref().map(|h| h.collect_in_range(&probe, 0.0, 3))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_collect,
    bench_collect_xy,
    bench_closest,
    bench_heap_build
);
criterion_main!(benches);
