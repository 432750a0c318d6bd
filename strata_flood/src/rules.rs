// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification rules: parity, union, and winding-number collection.

use alloc::vec::Vec;
use tracing::debug;

use crate::graph::FloodGraph;
use crate::searcher::{FloodRule, FloodSearcher};
use crate::types::{NodeId, NodeMask};

/// Even-odd classification.
///
/// Depth flips each time the search crosses an edge carrying the boundary mask; faces at even
/// depth get the exterior mask. Seed faces are exterior at depth 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParityRule {
    /// Mask identifying boundary edges (on either half-edge).
    pub boundary_mask: NodeMask,
    /// Mask written around exterior faces.
    pub exterior_mask: NodeMask,
}

impl Default for ParityRule {
    fn default() -> Self {
        Self {
            boundary_mask: NodeMask::BOUNDARY,
            exterior_mask: NodeMask::EXTERIOR,
        }
    }
}

impl<G: FloodGraph + ?Sized> FloodRule<G> for ParityRule {
    fn mark_seed_face(&mut self, graph: &mut G, seed: NodeId) -> i32 {
        graph.set_mask_around_face(seed, self.exterior_mask);
        0
    }

    fn step_into_face(&mut self, graph: &mut G, curr: NodeId, depth: i32, mate: NodeId) -> i32 {
        let crossed_boundary =
            graph.has_mask(curr, self.boundary_mask) || graph.has_mask(mate, self.boundary_mask);
        let depth = if crossed_boundary { 1 - depth } else { depth };
        if depth.rem_euclid(2) == 0 {
            graph.set_mask_around_face(mate, self.exterior_mask);
        }
        depth
    }
}

/// Winding count change when crossing from `curr` to `mate`.
///
/// Leaving a face marked outside one input region enters that region; entering such a face
/// leaves it.
fn winding_step<G: FloodGraph + ?Sized>(
    graph: &G,
    single_exterior_mask: NodeMask,
    curr: NodeId,
    depth: i32,
    mate: NodeId,
) -> i32 {
    let mut depth = depth;
    if graph.has_mask(curr, single_exterior_mask) {
        depth += 1;
    }
    if graph.has_mask(mate, single_exterior_mask) {
        depth -= 1;
    }
    depth
}

/// Union classification by winding count.
///
/// Faces whose winding count falls below `minimum_winding_for_inside` get the exterior mask.
/// Seed faces are exterior at winding 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnionRule {
    /// Mask marking the outside of each individual input region.
    pub single_exterior_mask: NodeMask,
    /// Mask written around exterior faces.
    pub exterior_mask: NodeMask,
    /// Smallest winding count classified as inside.
    pub minimum_winding_for_inside: i32,
}

impl UnionRule {
    /// A rule with the standard masks.
    pub fn new(minimum_winding_for_inside: i32) -> Self {
        Self {
            single_exterior_mask: NodeMask::SINGLE_EXTERIOR,
            exterior_mask: NodeMask::EXTERIOR,
            minimum_winding_for_inside,
        }
    }
}

impl Default for UnionRule {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<G: FloodGraph + ?Sized> FloodRule<G> for UnionRule {
    fn mark_seed_face(&mut self, graph: &mut G, seed: NodeId) -> i32 {
        graph.set_mask_around_face(seed, self.exterior_mask);
        0
    }

    fn step_into_face(&mut self, graph: &mut G, curr: NodeId, depth: i32, mate: NodeId) -> i32 {
        let depth = winding_step(graph, self.single_exterior_mask, curr, depth, mate);
        if depth < self.minimum_winding_for_inside {
            graph.set_mask_around_face(mate, self.exterior_mask);
        }
        depth
    }
}

/// Records the winding count of every face entered, without writing masks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindingCollector {
    /// Mask marking the outside of each individual input region.
    pub single_exterior_mask: NodeMask,
    /// `(node, winding)` for each face entered, in visit order. The node is the one the search
    /// entered the face through.
    pub entries: Vec<(NodeId, i32)>,
}

impl Default for WindingCollector {
    fn default() -> Self {
        Self {
            single_exterior_mask: NodeMask::SINGLE_EXTERIOR,
            entries: Vec::new(),
        }
    }
}

impl<G: FloodGraph + ?Sized> FloodRule<G> for WindingCollector {
    fn mark_seed_face(&mut self, _graph: &mut G, seed: NodeId) -> i32 {
        self.entries.push((seed, 0));
        0
    }

    fn step_into_face(&mut self, graph: &mut G, curr: NodeId, depth: i32, mate: NodeId) -> i32 {
        let depth = winding_step(graph, self.single_exterior_mask, curr, depth, mate);
        self.entries.push((mate, depth));
        depth
    }
}

/// Mark exterior faces with [`NodeMask::EXTERIOR`] by the even-odd rule across
/// [`NodeMask::BOUNDARY`] edges. Returns the number of components flooded.
pub fn mark_exterior_by_parity<G: FloodGraph + ?Sized>(graph: &mut G) -> usize {
    let Some(mut searcher) = FloodSearcher::new(graph, ParityRule::default()) else {
        return 0;
    };
    let components = searcher.run_flood_from_all_negative_area_faces();
    debug!(components, "parity classification");
    components
}

/// Mark faces covered by fewer than `minimum_winding_for_inside` input regions with
/// [`NodeMask::EXTERIOR`]. Returns the number of components flooded.
pub fn mark_exterior_by_union<G: FloodGraph + ?Sized>(
    graph: &mut G,
    minimum_winding_for_inside: i32,
) -> usize {
    let Some(mut searcher) =
        FloodSearcher::new(graph, UnionRule::new(minimum_winding_for_inside))
    else {
        return 0;
    };
    let components = searcher.run_flood_from_all_negative_area_faces();
    debug!(
        components,
        minimum_winding_for_inside, "union classification"
    );
    components
}

/// Winding count of every face, one `(node, winding)` entry per face reachable from a
/// negative-area seed.
pub fn collect_winding_numbers<G: FloodGraph + ?Sized>(graph: &mut G) -> Vec<(NodeId, i32)> {
    let Some(mut searcher) = FloodSearcher::new(graph, WindingCollector::default()) else {
        return Vec::new();
    };
    searcher.run_flood_from_all_negative_area_faces();
    core::mem::take(&mut searcher.rule_mut().entries)
}
