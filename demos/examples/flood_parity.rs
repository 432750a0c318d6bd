// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Face classification by parity, union and winding number.
//!
//! Two overlapping squares are assembled into one planar graph, then classified three ways.
//!
//! Run:
//! - `cargo run -p strata_demos --example flood_parity`

use kurbo::Point;
use strata_flood::{
    FloodGraph, NodeMask, PlanarGraph, PlanarGraphBuilder, collect_winding_numbers,
    mark_exterior_by_parity, mark_exterior_by_union,
};

fn overlapping_squares() -> PlanarGraph {
    let mut b = PlanarGraphBuilder::new();
    let interior = NodeMask::BOUNDARY;
    let exterior = NodeMask::BOUNDARY | NodeMask::SINGLE_EXTERIOR;
    // Boundaries are split where they cross, at (2, 1) and (1, 2).
    b.add_polygon(
        &[
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 2.0),
            Point::new(0.0, 2.0),
        ],
        interior,
        exterior,
    );
    b.add_polygon(
        &[
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(1.0, 3.0),
            Point::new(1.0, 2.0),
        ],
        interior,
        exterior,
    );
    b.build()
}

fn report(label: &str, g: &PlanarGraph) {
    println!("{label}:");
    for face in g.faces() {
        let state = if g.has_mask(face, NodeMask::EXTERIOR) {
            "exterior"
        } else {
            "interior"
        };
        println!(
            "  face at {:?}  area {:>5.1}  {state}",
            g.point(face),
            g.face_area(face)
        );
    }
}

fn main() {
    let mut g = overlapping_squares();
    println!("{} nodes, {} faces", g.len(), g.face_count());

    mark_exterior_by_parity(&mut g);
    report("parity", &g);

    g.clear_mask_in_set(NodeMask::EXTERIOR);
    mark_exterior_by_union(&mut g, 1);
    report("union (winding >= 1)", &g);

    g.clear_mask_in_set(NodeMask::EXTERIOR);
    mark_exterior_by_union(&mut g, 2);
    report("intersection (winding >= 2)", &g);

    println!("winding numbers:");
    for (node, winding) in collect_winding_numbers(&mut g) {
        println!("  area {:>5.1}  winding {winding}", g.face_area(node));
    }
}
