// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment ranges of a polyline, as seen by the range heap.

use strata_index::{Point3d, Range3d, RangeSource};

/// [`RangeSource`] over the segments of a polyline.
///
/// Leaf `i` is the segment from point `i` to point `i + 1`, so a span `first..=last` covers
/// points `first..=last + 1`.
#[derive(Copy, Clone, Debug)]
pub struct PolylineRanges<'a> {
    points: &'a [Point3d],
}

impl<'a> PolylineRanges<'a> {
    /// Wrap a point slice.
    pub fn new(points: &'a [Point3d]) -> Self {
        Self { points }
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

impl RangeSource for PolylineRanges<'_> {
    fn range(&self, first: usize, last: usize) -> Option<Range3d> {
        if first > last {
            return None;
        }
        let end = last.checked_add(2)?;
        let span = self.points.get(first..end)?;
        Some(Range3d::from_points(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_cover_segment_endpoints() {
        let points = [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(2.0, 1.0, 0.0),
            Point3d::new(1.0, 5.0, -3.0),
        ];
        let ranges = PolylineRanges::new(&points);
        assert_eq!(ranges.segment_count(), 2);
        assert_eq!(
            ranges.range(0, 0),
            Some(Range3d::from_corners([0.0, 0.0, 0.0], [2.0, 1.0, 0.0]))
        );
        assert_eq!(
            ranges.range(0, 1),
            Some(Range3d::from_corners([0.0, 0.0, -3.0], [2.0, 5.0, 0.0]))
        );
        assert_eq!(ranges.range(1, 2), None);
        assert_eq!(ranges.range(1, 0), None);
    }

    #[test]
    fn short_polylines_have_no_segments() {
        let one = [Point3d::ZERO];
        assert_eq!(PolylineRanges::new(&one).segment_count(), 0);
        assert_eq!(PolylineRanges::new(&one).range(0, 0), None);
        assert_eq!(PolylineRanges::new(&[]).segment_count(), 0);
    }
}
