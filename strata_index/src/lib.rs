// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Index: ranges and spatial hierarchies for geometric search.
//!
//! Strata Index is the leaf layer of the Strata geometry crates.
//!
//! - [`Range`] (with the [`Range2d`] and [`Range3d`] aliases): axis-aligned boxes that
//!   distinguish the *null* sentinel from merely *empty* ranges, with tolerant overlap tests
//!   restricted to a chosen number of axes.
//! - [`QuadTree`]: a point-location index over items implementing [`QuadItem`].
//! - [`IndexedRangeHeap`]: a bounding hierarchy over contiguous leaf indices. Ranges come from a
//!   [`RangeSource`], and pairs of heaps are searched together under the control of a
//!   [`PairProcessor`] that prunes node pairs and handles leaf pairs.
//!
//! Nothing here owns geometry beyond a single query: heaps and trees are built, searched,
//! and dropped.
//!
//! # Example
//!
//! ```rust
//! use strata_index::{IndexedRangeHeap, Range3d};
//!
//! let boxes = [
//!     Range3d::from_corners([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
//!     Range3d::from_corners([5.0, 5.0, 5.0], [6.0, 6.0, 6.0]),
//!     Range3d::from_corners([0.5, 0.5, 0.5], [2.0, 2.0, 2.0]),
//! ];
//! let heap = IndexedRangeHeap::build(2, &boxes[..], 0, 2, false).unwrap();
//!
//! let probe = Range3d::from_corners([0.9, 0.9, 0.9], [1.1, 1.1, 1.1]);
//! assert_eq!(heap.collect_in_range(&probe, 0.0, 3), vec![0, 2]);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod heap;
pub mod quad_tree;
pub mod source;
pub mod types;

pub use heap::IndexedRangeHeap;
pub use quad_tree::{QuadItem, QuadTree, QuadTreeOptions};
pub use source::{PairProcessor, RangeSource};
pub use types::{Point3d, Range, Range2d, Range3d};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn heap_and_quad_tree_agree_on_point_hits() {
        let boxes = [
            Range2d::new(0.0, 0.0, 10.0, 10.0),
            Range2d::new(5.0, 5.0, 15.0, 15.0),
            Range2d::new(20.0, 20.0, 30.0, 30.0),
        ];
        let mut tree = QuadTree::new(Range2d::new(0.0, 0.0, 32.0, 32.0));
        for b in boxes {
            assert!(tree.add_item(b));
        }
        let spatial: Vec<Range3d> = boxes
            .iter()
            .map(|b| Range3d::from_low_high([b.low[0], b.low[1], 0.0], [b.high[0], b.high[1], 0.0]))
            .collect();
        let heap = IndexedRangeHeap::build(2, &spatial[..], 0, 2, false).unwrap();

        for (x, y) in [(6.0, 6.0), (1.0, 1.0), (25.0, 25.0), (18.0, 18.0)] {
            let probe = Range3d::from_corners([x, y, 0.0], [x, y, 0.0]);
            let from_heap = heap.collect_in_range(&probe, 0.0, 2);
            let mut from_tree: Vec<usize> = tree
                .query(x, y)
                .into_iter()
                .map(|hit| boxes.iter().position(|b| b == hit).unwrap())
                .collect();
            from_tree.sort_unstable();
            assert_eq!(from_heap, from_tree, "disagreement at ({x}, {y})");
        }
    }
}
