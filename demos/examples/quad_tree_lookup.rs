// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point location with the quad tree and the range heap.
//!
//! Run:
//! - `cargo run -p strata_demos --example quad_tree_lookup`

use strata_index::{IndexedRangeHeap, QuadItem, QuadTree, Range2d, Range3d};

/// A labelled disc; the quad tree indexes its bounding box and tests the disc itself.
#[derive(Clone, Debug)]
struct Disc {
    name: &'static str,
    cx: f64,
    cy: f64,
    r: f64,
}

impl Disc {
    const fn new(name: &'static str, cx: f64, cy: f64, r: f64) -> Self {
        Self { name, cx, cy, r }
    }
}

impl QuadItem for Disc {
    fn extent(&self) -> Range2d {
        Range2d::new(
            self.cx - self.r,
            self.cy - self.r,
            self.cx + self.r,
            self.cy + self.r,
        )
    }

    fn is_point_in(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= self.r * self.r
    }
}

fn main() {
    let discs = [
        Disc::new("small", 10.0, 10.0, 2.0),
        Disc::new("medium", 30.0, 30.0, 8.0),
        Disc::new("large", 64.0, 64.0, 40.0),
        Disc::new("corner", 120.0, 4.0, 3.0),
    ];

    let mut tree = QuadTree::new(Range2d::new(0.0, 0.0, 128.0, 128.0));
    for d in &discs {
        let added = tree.add_item(d.clone());
        println!("add {:<7} -> {added}", d.name);
    }
    println!("tree depth {} with {} items", tree.depth(), tree.len());

    let probes = [
        (10.0, 10.0),
        (30.0, 33.0),
        (70.0, 70.0),
        (121.0, 5.0),
        (1.0, 127.0),
    ];
    for (x, y) in probes {
        let names: Vec<&str> = tree.query(x, y).iter().map(|d| d.name).collect();
        let single = tree.query_single(x, y).map(|d| d.name);
        println!("({x:>5}, {y:>5}): all {names:?}, first {single:?}");
    }

    // The same boxes in a range heap, queried by window.
    let boxes: Vec<Range3d> = discs
        .iter()
        .map(|d| {
            let e = d.extent();
            Range3d::from_low_high([e.low[0], e.low[1], 0.0], [e.high[0], e.high[1], 0.0])
        })
        .collect();
    if let Some(heap) = IndexedRangeHeap::build(2, &boxes[..], 0, boxes.len() - 1, false) {
        let window = Range3d::from_corners([20.0, 20.0, 0.0], [40.0, 40.0, 0.0]);
        let hits: Vec<&str> = heap
            .collect_in_range(&window, 0.0, 2)
            .into_iter()
            .map(|i| discs[i].name)
            .collect();
        println!("window [20,40]^2 overlaps {hits:?}");
    }
}
