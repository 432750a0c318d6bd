// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits for [`IndexedRangeHeap`](crate::IndexedRangeHeap).

use crate::types::Range3d;

/// Supplies ranges for contiguous spans of leaf indices.
///
/// The heap never sees the underlying geometry; it only asks for ranges. For polylines, leaf `i`
/// is the segment from point `i` to point `i + 1`.
pub trait RangeSource {
    /// Range covering every leaf in `first..=last`.
    ///
    /// Returns `None` when the span has no valid range (for example out-of-range indices).
    fn range(&self, first: usize, last: usize) -> Option<Range3d>;
}

impl<S: RangeSource + ?Sized> RangeSource for &S {
    fn range(&self, first: usize, last: usize) -> Option<Range3d> {
        (**self).range(first, last)
    }
}

/// Callbacks driving a dual-tree search between two heaps.
pub trait PairProcessor {
    /// Decide whether the node pair covering `a_first..=a_last` and `b_first..=b_last` can hold
    /// anything of interest. Returning `false` prunes the whole pair subtree.
    fn need_processing(
        &mut self,
        range_a: &Range3d,
        a_first: usize,
        a_last: usize,
        range_b: &Range3d,
        b_first: usize,
        b_last: usize,
    ) -> bool;

    /// Handle a single unpruned leaf pair.
    fn process(&mut self, a: usize, b: usize);
}
