// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Result and option types for polyline searches.

use strata_index::Point3d;

/// A located point on a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CurveLocationDetail {
    /// Segment index: segment `i` runs from point `i` to point `i + 1`.
    pub component_index: usize,
    /// Fraction within the segment, in `[0, 1]`.
    pub component_fraction: f64,
    /// Fraction along the whole polyline, or the interpolated caller parameter when a
    /// per-vertex parameter array was supplied.
    pub fraction: f64,
    /// The point itself.
    pub point: Point3d,
    /// Associated scalar. Search results store the approach distance here.
    pub a: f64,
}

/// A pair of located points, one on each polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CloseApproach {
    /// Location on the first polyline.
    pub a: CurveLocationDetail,
    /// Location on the second polyline.
    pub b: CurveLocationDetail,
}

impl CloseApproach {
    /// Distance between the two points under the metric of the search that produced them.
    pub fn distance(&self) -> f64 {
        self.a.a
    }
}

/// How a search walks the segment pairs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Use the range heap when the segment-pair count exceeds
    /// [`CloseApproachOptions::heap_transition`], otherwise test every pair.
    #[default]
    Auto,
    /// Always use the range heap.
    Heap,
    /// Always test every pair.
    BruteForce,
}

/// Tuning for polyline searches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CloseApproachOptions {
    /// Segment-pair count (`|A| * |B|`) above which [`SearchStrategy::Auto`] uses the heap.
    pub heap_transition: usize,
    /// Branch factor of the range heaps.
    pub branch_factor: usize,
    /// Traversal strategy.
    pub strategy: SearchStrategy,
}

impl Default for CloseApproachOptions {
    fn default() -> Self {
        Self {
            heap_transition: 20,
            branch_factor: 2,
            strategy: SearchStrategy::Auto,
        }
    }
}

impl CloseApproachOptions {
    /// Options with a forced strategy.
    pub fn with_strategy(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
