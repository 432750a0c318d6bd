// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use strata_flood::{
    NodeMask, PlanarGraph, PlanarGraphBuilder, collect_winding_numbers, mark_exterior_by_parity,
    mark_exterior_by_union,
};

/// An `n` by `n` grid of unit cells. Every edge is a boundary, so parity gives a checkerboard.
fn gen_grid(n: usize) -> PlanarGraph {
    let mut b = PlanarGraphBuilder::new();
    let m = NodeMask::BOUNDARY | NodeMask::SINGLE_EXTERIOR;
    let mut v = vec![vec![0_usize; n + 1]; n + 1];
    for (y, row) in v.iter_mut().enumerate() {
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = b.add_vertex(Point::new(x as f64, y as f64));
        }
    }
    for y in 0..=n {
        for x in 0..=n {
            if x < n {
                b.add_edge(v[y][x], v[y][x + 1], m, m);
            }
            if y < n {
                b.add_edge(v[y][x], v[y + 1][x], m, m);
            }
        }
    }
    b.build()
}

/// A single row of `n` cells, which makes the flood stack as deep as the row is long.
fn gen_strip(n: usize) -> PlanarGraph {
    let mut b = PlanarGraphBuilder::new();
    let m = NodeMask::BOUNDARY;
    for i in 0..=n {
        let lo = b.add_vertex(Point::new(i as f64, 0.0));
        let hi = b.add_vertex(Point::new(i as f64, 1.0));
        b.add_edge(lo, hi, m, m);
        if i < n {
            let next_lo = b.add_vertex(Point::new(i as f64 + 1.0, 0.0));
            let next_hi = b.add_vertex(Point::new(i as f64 + 1.0, 1.0));
            b.add_edge(lo, next_lo, m, m);
            b.add_edge(next_hi, hi, m, m);
        }
    }
    b.build()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");
    for &n in &[16_usize, 64] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{n}"), |bench| {
            bench.iter(|| black_box(gen_grid(n).len()));
        });
    }
    group.finish();
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood");
    for &n in &[16_usize, 64] {
        let grid = gen_grid(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("parity_grid_n{n}"), |bench| {
            bench.iter_batched(
                || grid.clone(),
                |mut g| black_box(mark_exterior_by_parity(&mut g)),
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("union_grid_n{n}"), |bench| {
            bench.iter_batched(
                || grid.clone(),
                |mut g| black_box(mark_exterior_by_union(&mut g, 1)),
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("winding_grid_n{n}"), |bench| {
            bench.iter_batched(
                || grid.clone(),
                |mut g| black_box(collect_winding_numbers(&mut g).len()),
                BatchSize::LargeInput,
            );
        });
    }
    let strip = gen_strip(10_000);
    group.bench_function("parity_strip_n10000", |bench| {
        bench.iter_batched(
            || strip.clone(),
            |mut g| black_box(mark_exterior_by_parity(&mut g)),
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_rules);
criterion_main!(benches);
