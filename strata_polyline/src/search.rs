// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Close-approach searches between two polylines.
//!
//! Every search reduces to testing segment pairs. Small inputs test every pair directly; larger
//! ones build an [`IndexedRangeHeap`] per polyline and let the dual-tree traversal prune pairs
//! whose ranges are too far apart. Two processors share that traversal:
//!
//! - a collector with a fixed distance bound, recording every qualifying pair, and
//! - a shrinking search whose bound tightens to the best distance seen so far.

use strata_index::{IndexedRangeHeap, PairProcessor, Point3d, Range3d};
use tracing::{debug, trace};

use crate::ranges::PolylineRanges;
use crate::segment::{
    ALMOST_EQUAL_RELATIVE_TOLERANCE, almost_equal_xy, distance, distance_xy,
    segment_closest_approach, segment_closest_approach_xy,
};
use crate::types::{CloseApproach, CloseApproachOptions, CurveLocationDetail, SearchStrategy};

/// Collect every segment pair of `a` and `b` whose closest approach is within `max_dist`.
///
/// `param_a` and `param_b` optionally give one parameter per point; reported fractions are then
/// interpolated from them instead of being uniform along the polyline. Each slice must match its
/// point count; a mismatched slice is ignored in release builds.
///
/// Polylines with fewer than two points have no segments and produce no results. The order of the
/// returned approaches is unspecified.
pub fn add_close_approaches(
    a: &[Point3d],
    param_a: Option<&[f64]>,
    b: &[Point3d],
    param_b: Option<&[f64]>,
    max_dist: f64,
    options: &CloseApproachOptions,
) -> Vec<CloseApproach> {
    collect(a, param_a, b, param_b, max_dist, Metric::Spatial, options)
}

/// Like [`add_close_approaches`], measured in the XY plane.
///
/// Segment pairs whose closest points coincide in XY up to round-off are reported as
/// intersections with distance zero, even when `max_dist` is zero.
pub fn collect_intersections_and_close_approaches_xy(
    a: &[Point3d],
    param_a: Option<&[f64]>,
    b: &[Point3d],
    param_b: Option<&[f64]>,
    max_dist: f64,
    options: &CloseApproachOptions,
) -> Vec<CloseApproach> {
    collect(a, param_a, b, param_b, max_dist, Metric::Planar, options)
}

/// The single closest approach between `a` and `b`, or `None` when either has no segments.
pub fn closest_approach(
    a: &[Point3d],
    param_a: Option<&[f64]>,
    b: &[Point3d],
    param_b: Option<&[f64]>,
    options: &CloseApproachOptions,
) -> Option<CloseApproach> {
    closest(a, param_a, b, param_b, Metric::Spatial, options)
}

/// Like [`closest_approach`], measured in the XY plane.
pub fn closest_approach_xy(
    a: &[Point3d],
    param_a: Option<&[f64]>,
    b: &[Point3d],
    param_b: Option<&[f64]>,
    options: &CloseApproachOptions,
) -> Option<CloseApproach> {
    closest(a, param_a, b, param_b, Metric::Planar, options)
}

fn collect(
    a: &[Point3d],
    param_a: Option<&[f64]>,
    b: &[Point3d],
    param_b: Option<&[f64]>,
    max_dist: f64,
    metric: Metric,
    options: &CloseApproachOptions,
) -> Vec<CloseApproach> {
    let tester = LeafTester {
        a: Polyline::new(a, param_a),
        b: Polyline::new(b, param_b),
        metric,
    };
    let mut collector = Collector {
        tester,
        max_dist,
        hits: Vec::new(),
    };
    run(tester, options, &mut collector);
    debug!(
        ?metric,
        max_dist,
        hits = collector.hits.len(),
        "collected close approaches"
    );
    collector.hits
}

fn closest(
    a: &[Point3d],
    param_a: Option<&[f64]>,
    b: &[Point3d],
    param_b: Option<&[f64]>,
    metric: Metric,
    options: &CloseApproachOptions,
) -> Option<CloseApproach> {
    let tester = LeafTester {
        a: Polyline::new(a, param_a),
        b: Polyline::new(b, param_b),
        metric,
    };
    let mut shrinking = Shrinking::new(tester);
    run(tester, options, &mut shrinking);
    debug!(
        ?metric,
        distance = shrinking.max_dist,
        found = shrinking.best.is_some(),
        "closest approach search finished"
    );
    shrinking.best
}

/// Drive `processor` over every candidate segment pair. Returns whether the heaps were used.
fn run<P: PairProcessor>(
    tester: LeafTester<'_>,
    options: &CloseApproachOptions,
    processor: &mut P,
) -> bool {
    let na = tester.a.segment_count();
    let nb = tester.b.segment_count();
    if na == 0 || nb == 0 {
        return false;
    }
    let use_heap = match options.strategy {
        SearchStrategy::Auto => na.saturating_mul(nb) > options.heap_transition,
        SearchStrategy::Heap => true,
        SearchStrategy::BruteForce => false,
    };
    debug!(
        segments_a = na,
        segments_b = nb,
        use_heap,
        "polyline pair search"
    );

    if use_heap {
        let flatten_z = tester.metric.flatten_z();
        let heaps = (
            IndexedRangeHeap::build(
                options.branch_factor,
                &PolylineRanges::new(tester.a.points),
                0,
                na - 1,
                flatten_z,
            ),
            IndexedRangeHeap::build(
                options.branch_factor,
                &PolylineRanges::new(tester.b.points),
                0,
                nb - 1,
                flatten_z,
            ),
        );
        if let (Some(heap_a), Some(heap_b)) = heaps {
            IndexedRangeHeap::search_pairs(&heap_a, &heap_b, processor);
            return true;
        }
    }
    for i in 0..na {
        for j in 0..nb {
            processor.process(i, j);
        }
    }
    false
}

/// Distance measure of a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Metric {
    Spatial,
    Planar,
}

impl Metric {
    fn dimensions(self) -> usize {
        match self {
            Self::Spatial => 3,
            Self::Planar => 2,
        }
    }

    fn flatten_z(self) -> bool {
        self == Self::Planar
    }
}

/// A polyline with optional per-point parameters.
#[derive(Copy, Clone, Debug)]
struct Polyline<'a> {
    points: &'a [Point3d],
    params: Option<&'a [f64]>,
}

impl<'a> Polyline<'a> {
    fn new(points: &'a [Point3d], params: Option<&'a [f64]>) -> Self {
        debug_assert!(
            params.is_none_or(|p| p.len() == points.len()),
            "parameter count must match point count"
        );
        Self {
            points,
            params: params.filter(|p| p.len() == points.len()),
        }
    }

    fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    fn global_fraction(&self, segment: usize, fraction: f64) -> f64 {
        match self.params {
            Some(p) => p[segment] + fraction * (p[segment + 1] - p[segment]),
            None => (segment as f64 + fraction) / self.segment_count() as f64,
        }
    }

    fn detail(
        &self,
        segment: usize,
        fraction: f64,
        point: Point3d,
        a: f64,
    ) -> CurveLocationDetail {
        CurveLocationDetail {
            component_index: segment,
            component_fraction: fraction,
            fraction: self.global_fraction(segment, fraction),
            point,
            a,
        }
    }
}

/// Evaluates one segment pair.
#[derive(Copy, Clone, Debug)]
struct LeafTester<'a> {
    a: Polyline<'a>,
    b: Polyline<'a>,
    metric: Metric,
}

impl LeafTester<'_> {
    /// The approach between segment `ia` of `a` and segment `ib` of `b`, when within `max_dist`.
    fn test(&self, ia: usize, ib: usize, max_dist: f64) -> Option<CloseApproach> {
        let (a0, a1) = (self.a.points[ia], self.a.points[ia + 1]);
        let (b0, b1) = (self.b.points[ib], self.b.points[ib + 1]);
        let (fa, fb, d) = match self.metric {
            Metric::Spatial => {
                let (fa, fb) = segment_closest_approach(a0, a1, b0, b1);
                let d = distance(a0.interpolate(fa, a1), b0.interpolate(fb, b1));
                if d > max_dist {
                    return None;
                }
                (fa, fb, d)
            }
            Metric::Planar => {
                let (fa, fb) = segment_closest_approach_xy(a0, a1, b0, b1);
                let pa = a0.interpolate(fa, a1);
                let pb = b0.interpolate(fb, b1);
                if almost_equal_xy(pa, pb) {
                    (fa, fb, 0.0)
                } else {
                    let d = distance_xy(pa, pb);
                    if d > max_dist {
                        return None;
                    }
                    (fa, fb, d)
                }
            }
        };
        Some(CloseApproach {
            a: self.a.detail(ia, fa, a0.interpolate(fa, a1), d),
            b: self.b.detail(ib, fb, b0.interpolate(fb, b1), d),
        })
    }

    /// Whether any pair of segments under `range_a` and `range_b` could pass [`Self::test`].
    fn ranges_within(&self, range_a: &Range3d, range_b: &Range3d, max_dist: f64) -> bool {
        let tolerance = match self.metric {
            Metric::Spatial => max_dist,
            // Coincidence is relative, so the bound widens with coordinate size.
            Metric::Planar => {
                let scale = [range_a, range_b]
                    .iter()
                    .flat_map(|r| [r.low[0], r.low[1], r.high[0], r.high[1]])
                    .fold(0.0_f64, |m, v| m.max(v.abs()));
                max_dist.max(ALMOST_EQUAL_RELATIVE_TOLERANCE * (1.0 + scale))
            }
        };
        range_a.intersects_with(range_b, tolerance, self.metric.dimensions())
    }
}

/// Records every pair within a fixed bound.
#[derive(Debug)]
struct Collector<'a> {
    tester: LeafTester<'a>,
    max_dist: f64,
    hits: Vec<CloseApproach>,
}

impl PairProcessor for Collector<'_> {
    fn need_processing(
        &mut self,
        range_a: &Range3d,
        _a_first: usize,
        _a_last: usize,
        range_b: &Range3d,
        _b_first: usize,
        _b_last: usize,
    ) -> bool {
        self.tester.ranges_within(range_a, range_b, self.max_dist)
    }

    fn process(&mut self, a: usize, b: usize) {
        if let Some(hit) = self.tester.test(a, b, self.max_dist) {
            trace!(a, b, distance = hit.distance(), "close approach");
            self.hits.push(hit);
        }
    }
}

/// Keeps the best pair seen so far and prunes against its distance.
#[derive(Debug)]
struct Shrinking<'a> {
    tester: LeafTester<'a>,
    max_dist: f64,
    best: Option<CloseApproach>,
}

impl<'a> Shrinking<'a> {
    fn new(tester: LeafTester<'a>) -> Self {
        Self {
            tester,
            max_dist: f64::INFINITY,
            best: None,
        }
    }
}

impl PairProcessor for Shrinking<'_> {
    fn need_processing(
        &mut self,
        range_a: &Range3d,
        _a_first: usize,
        _a_last: usize,
        range_b: &Range3d,
        _b_first: usize,
        _b_last: usize,
    ) -> bool {
        self.tester.ranges_within(range_a, range_b, self.max_dist)
    }

    fn process(&mut self, a: usize, b: usize) {
        let Some(hit) = self.tester.test(a, b, self.max_dist) else {
            return;
        };
        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| hit.distance() < best.distance());
        if improves {
            trace!(a, b, distance = hit.distance(), "closer approach");
            self.max_dist = hit.distance();
            self.best = Some(hit);
        }
    }
}
