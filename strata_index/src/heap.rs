// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indexed range heap: a bounding hierarchy over contiguous leaf indices.
//!
//! The heap is built once per search from a [`RangeSource`] and never updated. Leaves are single
//! indices; each internal node covers a contiguous span split into up to `branch_factor`
//! children of near-equal size, and its range is the union of its children's ranges.

use alloc::vec;
use alloc::vec::Vec;

use crate::source::{PairProcessor, RangeSource};
use crate::types::Range3d;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
enum Kind {
    Leaf,
    Internal(Vec<NodeIdx>),
}

#[derive(Clone, Debug)]
struct Node {
    range: Range3d,
    first: usize,
    last: usize,
    kind: Kind,
}

/// A bounding hierarchy over leaf indices `first..=last`.
///
/// # Example
///
/// ```
/// use strata_index::{IndexedRangeHeap, PairProcessor, Range3d};
///
/// let a = [
///     Range3d::from_corners([0.0, 0.0, 0.0], [1.0, 1.0, 0.0]),
///     Range3d::from_corners([1.0, 0.0, 0.0], [2.0, 1.0, 0.0]),
/// ];
/// let b = [Range3d::from_corners([1.5, 0.5, 0.0], [3.0, 3.0, 0.0])];
///
/// struct Overlaps(Vec<(usize, usize)>);
/// impl PairProcessor for Overlaps {
///     fn need_processing(
///         &mut self,
///         ra: &Range3d, _: usize, _: usize,
///         rb: &Range3d, _: usize, _: usize,
///     ) -> bool {
///         ra.intersects_with(rb, 0.0, 3)
///     }
///     fn process(&mut self, a: usize, b: usize) {
///         self.0.push((a, b));
///     }
/// }
///
/// let ha = IndexedRangeHeap::build(2, &a[..], 0, 1, false).unwrap();
/// let hb = IndexedRangeHeap::build(2, &b[..], 0, 0, false).unwrap();
/// let mut hits = Overlaps(Vec::new());
/// IndexedRangeHeap::search_pairs(&ha, &hb, &mut hits);
/// assert_eq!(hits.0, vec![(1, 0)]);
/// ```
#[derive(Clone, Debug)]
pub struct IndexedRangeHeap {
    branch_factor: usize,
    root: NodeIdx,
    arena: Vec<Node>,
}

impl IndexedRangeHeap {
    /// Build a heap over leaves `first..=last`.
    ///
    /// `branch_factor` values below 2 are treated as 2. Leaves whose range the source cannot
    /// supply get a null range and are therefore never reported by tolerance-based pruning.
    /// With `flatten_z` every leaf range has its z extent collapsed, for planar-only searches.
    ///
    /// Returns `None` when `first > last`.
    pub fn build<S: RangeSource + ?Sized>(
        branch_factor: usize,
        source: &S,
        first: usize,
        last: usize,
        flatten_z: bool,
    ) -> Option<Self> {
        if first > last {
            return None;
        }
        let mut heap = Self {
            branch_factor: branch_factor.max(2),
            root: NodeIdx::new(0),
            arena: Vec::with_capacity(2 * (last - first + 1)),
        };
        heap.root = heap.build_node(source, first, last, flatten_z);
        Some(heap)
    }

    fn build_node<S: RangeSource + ?Sized>(
        &mut self,
        source: &S,
        first: usize,
        last: usize,
        flatten_z: bool,
    ) -> NodeIdx {
        if first == last {
            let mut range = source.range(first, first).unwrap_or_default();
            if flatten_z {
                range = range.with_z_flattened();
            }
            let idx = NodeIdx::new(self.arena.len());
            self.arena.push(Node {
                range,
                first,
                last,
                kind: Kind::Leaf,
            });
            return idx;
        }

        let count = last - first + 1;
        let parts = self.branch_factor.min(count);
        let mut children = Vec::with_capacity(parts);
        let mut range = Range3d::null();
        for k in 0..parts {
            let c0 = first + k * count / parts;
            let c1 = first + (k + 1) * count / parts - 1;
            let child = self.build_node(source, c0, c1, flatten_z);
            range.extend_by_range(&self.arena[child.get()].range);
            children.push(child);
        }
        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(Node {
            range,
            first,
            last,
            kind: Kind::Internal(children),
        });
        idx
    }

    /// Range of the whole heap.
    pub fn root_range(&self) -> Range3d {
        self.arena[self.root.get()].range
    }

    /// First and last leaf index covered by the heap.
    pub fn leaf_span(&self) -> (usize, usize) {
        let root = &self.arena[self.root.get()];
        (root.first, root.last)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        let (first, last) = self.leaf_span();
        last - first + 1
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Effective branch factor.
    pub fn branch_factor(&self) -> usize {
        self.branch_factor
    }

    /// Dual-tree search between `a` and `b`.
    ///
    /// Every node pair is offered to [`PairProcessor::need_processing`]; a `false` answer prunes
    /// the pair and everything below it. Each unpruned leaf pair reaches
    /// [`PairProcessor::process`] exactly once. Neither heap is modified.
    pub fn search_pairs<P: PairProcessor + ?Sized>(a: &Self, b: &Self, processor: &mut P) {
        Self::visit_pair(a, a.root, b, b.root, processor);
    }

    fn visit_pair<P: PairProcessor + ?Sized>(
        a: &Self,
        ia: NodeIdx,
        b: &Self,
        ib: NodeIdx,
        processor: &mut P,
    ) {
        let na = &a.arena[ia.get()];
        let nb = &b.arena[ib.get()];
        if !processor.need_processing(&na.range, na.first, na.last, &nb.range, nb.first, nb.last)
        {
            return;
        }
        match (&na.kind, &nb.kind) {
            (Kind::Leaf, Kind::Leaf) => processor.process(na.first, nb.first),
            (Kind::Leaf, Kind::Internal(cb)) => {
                for &c in cb {
                    Self::visit_pair(a, ia, b, c, processor);
                }
            }
            (Kind::Internal(ca), Kind::Leaf) => {
                for &c in ca {
                    Self::visit_pair(a, c, b, ib, processor);
                }
            }
            (Kind::Internal(ca), Kind::Internal(cb)) => {
                for &c in ca {
                    for &d in cb {
                        Self::visit_pair(a, c, b, d, processor);
                    }
                }
            }
        }
    }

    /// Leaf indices whose range intersects `range` within `tolerance` on the first
    /// `dimensions` axes. Results are in ascending index order.
    pub fn collect_in_range(&self, range: &Range3d, tolerance: f64, dimensions: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !n.range.intersects_with(range, tolerance, dimensions) {
                continue;
            }
            match &n.kind {
                Kind::Leaf => out.push(n.first),
                Kind::Internal(children) => stack.extend(children.iter().rev()),
            }
        }
        out
    }
}

impl RangeSource for [Range3d] {
    fn range(&self, first: usize, last: usize) -> Option<Range3d> {
        let span = self.get(first..=last)?;
        let mut r = Range3d::null();
        for s in span {
            r.extend_by_range(s);
        }
        Some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point3d;

    struct Rng(u64);

    impl Rng {
        fn next_f64(&mut self) -> f64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            ((x >> 11) as f64) / ((1_u64 << 53) as f64)
        }
    }

    fn random_boxes(rng: &mut Rng, n: usize, spread: f64, size: f64) -> Vec<Range3d> {
        (0..n)
            .map(|_| {
                let p = Point3d::new(
                    rng.next_f64() * spread,
                    rng.next_f64() * spread,
                    rng.next_f64() * spread,
                );
                let q = Point3d::new(p.x + size, p.y + size, p.z + size);
                Range3d::from_points(&[p, q])
            })
            .collect()
    }

    /// Records overlapping leaf pairs and counts callbacks.
    struct Overlaps {
        tolerance: f64,
        need_calls: usize,
        pairs: Vec<(usize, usize)>,
    }

    impl Overlaps {
        fn new(tolerance: f64) -> Self {
            Self {
                tolerance,
                need_calls: 0,
                pairs: Vec::new(),
            }
        }
    }

    impl PairProcessor for Overlaps {
        fn need_processing(
            &mut self,
            range_a: &Range3d,
            _: usize,
            _: usize,
            range_b: &Range3d,
            _: usize,
            _: usize,
        ) -> bool {
            self.need_calls += 1;
            range_a.intersects_with(range_b, self.tolerance, 3)
        }

        fn process(&mut self, a: usize, b: usize) {
            self.pairs.push((a, b));
        }
    }

    fn assert_internal_ranges_are_unions(heap: &IndexedRangeHeap, leaves: &[Range3d]) {
        for n in &heap.arena {
            let expected = leaves.range(n.first, n.last).expect("span in bounds");
            assert_eq!(n.range, expected, "node {}..={} range", n.first, n.last);
        }
    }

    #[test]
    fn build_rejects_inverted_span() {
        let leaves = [Range3d::from_corners([0.0; 3], [1.0; 3])];
        assert!(IndexedRangeHeap::build(2, &leaves[..], 1, 0, false).is_none());
    }

    #[test]
    fn internal_ranges_are_unions() {
        let mut rng = Rng(0x9e37_79b9_7f4a_7c15);
        let leaves = random_boxes(&mut rng, 37, 100.0, 2.0);
        for bf in [0, 2, 3, 5] {
            let heap = IndexedRangeHeap::build(bf, &leaves[..], 0, 36, false).unwrap();
            assert_eq!(heap.leaf_count(), 37);
            assert!(heap.branch_factor() >= 2);
            assert_internal_ranges_are_unions(&heap, &leaves);
        }
    }

    #[test]
    fn binary_heap_node_count() {
        let leaves = vec![Range3d::from_corners([0.0; 3], [1.0; 3]); 16];
        let heap = IndexedRangeHeap::build(2, &leaves[..], 0, 15, false).unwrap();
        assert_eq!(heap.node_count(), 31);
    }

    #[test]
    fn dual_search_matches_brute_force() {
        let mut rng = Rng(0x1234_5678_9abc_def1);
        let a = random_boxes(&mut rng, 60, 100.0, 3.0);
        let b = random_boxes(&mut rng, 45, 100.0, 3.0);
        let ha = IndexedRangeHeap::build(2, &a[..], 0, a.len() - 1, false).unwrap();
        let hb = IndexedRangeHeap::build(2, &b[..], 0, b.len() - 1, false).unwrap();

        let mut found = Overlaps::new(0.5);
        IndexedRangeHeap::search_pairs(&ha, &hb, &mut found);
        found.pairs.sort_unstable();

        let mut expected = Vec::new();
        for (i, ra) in a.iter().enumerate() {
            for (j, rb) in b.iter().enumerate() {
                if ra.intersects_with(rb, 0.5, 3) {
                    expected.push((i, j));
                }
            }
        }
        assert_eq!(found.pairs, expected);
        let mut dedup = found.pairs.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), found.pairs.len(), "each leaf pair is processed once");
    }

    #[test]
    fn separated_sets_are_pruned_at_the_root() {
        let mut rng = Rng(42);
        let a = random_boxes(&mut rng, 64, 10.0, 1.0);
        let b: Vec<_> = random_boxes(&mut rng, 64, 10.0, 1.0)
            .into_iter()
            .map(|r| Range3d::from_low_high(
                [r.low[0] + 1000.0, r.low[1], r.low[2]],
                [r.high[0] + 1000.0, r.high[1], r.high[2]],
            ))
            .collect();
        let ha = IndexedRangeHeap::build(2, &a[..], 0, 63, false).unwrap();
        let hb = IndexedRangeHeap::build(2, &b[..], 0, 63, false).unwrap();
        let mut p = Overlaps::new(1.0);
        IndexedRangeHeap::search_pairs(&ha, &hb, &mut p);
        assert!(p.pairs.is_empty());
        assert_eq!(p.need_calls, 1, "only the root pair is examined");
    }

    #[test]
    fn flattened_heap_ignores_z() {
        let a = [Range3d::from_corners([0.0, 0.0, 0.0], [1.0, 1.0, 0.0])];
        let b = [Range3d::from_corners([0.5, 0.5, 50.0], [2.0, 2.0, 60.0])];
        let ha = IndexedRangeHeap::build(2, &a[..], 0, 0, true).unwrap();
        let hb = IndexedRangeHeap::build(2, &b[..], 0, 0, true).unwrap();
        let mut p = Overlaps::new(0.0);
        IndexedRangeHeap::search_pairs(&ha, &hb, &mut p);
        assert_eq!(p.pairs, vec![(0, 0)]);

        let hb3 = IndexedRangeHeap::build(2, &b[..], 0, 0, false).unwrap();
        let ha3 = IndexedRangeHeap::build(2, &a[..], 0, 0, false).unwrap();
        let mut p3 = Overlaps::new(0.0);
        IndexedRangeHeap::search_pairs(&ha3, &hb3, &mut p3);
        assert!(p3.pairs.is_empty());
    }

    #[test]
    fn range_query_matches_linear_scan() {
        let mut rng = Rng(7);
        let leaves = random_boxes(&mut rng, 50, 100.0, 4.0);
        let heap = IndexedRangeHeap::build(3, &leaves[..], 0, 49, false).unwrap();
        let probe = Range3d::from_corners([20.0, 20.0, 20.0], [60.0, 60.0, 60.0]);
        let got = heap.collect_in_range(&probe, 0.0, 3);
        let expected: Vec<_> = (0..50)
            .filter(|&i| leaves[i].intersects_with(&probe, 0.0, 3))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn missing_leaf_ranges_never_match() {
        struct Partial;
        impl RangeSource for Partial {
            fn range(&self, first: usize, _last: usize) -> Option<Range3d> {
                (first != 1).then(|| Range3d::from_corners([0.0; 3], [1.0; 3]))
            }
        }
        let heap = IndexedRangeHeap::build(2, &Partial, 0, 2, false).unwrap();
        let got = heap.collect_in_range(&Range3d::from_corners([0.0; 3], [1.0; 3]), 0.0, 3);
        assert_eq!(got, vec![0, 2]);
    }
}
