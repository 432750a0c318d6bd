// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Close approaches between two polylines.
//!
//! Find every place two polylines come within a distance, their single nearest pair, and
//! their planar crossings.
//!
//! Run:
//! - `cargo run -p strata_demos --example close_approach`

use strata_index::Point3d;
use strata_polyline::{
    CloseApproach, CloseApproachOptions, SearchStrategy, add_close_approaches, closest_approach,
    collect_intersections_and_close_approaches_xy,
};

fn print_hits(label: &str, hits: &[CloseApproach]) {
    println!("{label}: {} hit(s)", hits.len());
    for h in hits {
        println!(
            "  A seg {} @ {:.3} (global {:.3})  B seg {} @ {:.3} (global {:.3})  d = {:.4}",
            h.a.component_index,
            h.a.component_fraction,
            h.a.fraction,
            h.b.component_index,
            h.b.component_fraction,
            h.b.fraction,
            h.distance()
        );
    }
}

fn main() {
    // A sawtooth along x and a gentle arc above it, lifted out of plane.
    let a: Vec<Point3d> = (0..=20)
        .map(|i| Point3d::new(i as f64, if i % 2 == 0 { 0.0 } else { 1.0 }, 0.0))
        .collect();
    let b: Vec<Point3d> = (0..=20)
        .map(|i| {
            let x = i as f64;
            Point3d::new(x, 1.5 - 0.01 * (x - 10.0) * (x - 10.0), 0.25)
        })
        .collect();

    let options = CloseApproachOptions::default();
    let mut hits = add_close_approaches(&a, None, &b, None, 0.6, &options);
    hits.sort_by(|p, q| p.a.fraction.total_cmp(&q.a.fraction));
    print_hits("within 0.6 (3D)", &hits);

    // Forcing brute force finds the same pairs.
    let brute = add_close_approaches(
        &a,
        None,
        &b,
        None,
        0.6,
        &CloseApproachOptions::with_strategy(SearchStrategy::BruteForce),
    );
    println!("brute force agrees on count: {}", brute.len() == hits.len());

    if let Some(best) = closest_approach(&a, None, &b, None, &options) {
        println!(
            "closest: A {:?}  B {:?}  d = {:.4}",
            best.a.point,
            best.b.point,
            best.distance()
        );
    }

    // Arc-length parameters carried through to the results.
    let mut arc = Vec::with_capacity(a.len());
    let mut s = 0.0;
    for (i, p) in a.iter().enumerate() {
        if i > 0 {
            s += p.distance_squared(a[i - 1]).sqrt();
        }
        arc.push(s);
    }
    let mut crossings =
        collect_intersections_and_close_approaches_xy(&a, Some(&arc), &b, None, 0.0, &options);
    crossings.sort_by(|p, q| p.a.fraction.total_cmp(&q.a.fraction));
    print_hits("planar crossings (A in arc length)", &crossings);
}
