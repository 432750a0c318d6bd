// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Face-by-face flood search over a [`FloodGraph`].

use alloc::vec::Vec;
use tracing::{debug, trace, warn};

use crate::graph::FloodGraph;
use crate::types::{NodeId, NodeMask};

/// Classification hooks applied as a flood search enters faces.
///
/// The search owns the traversal; a rule only decides the depth of each face and which mask bits
/// to record. Rules see the whole graph mutably so they can mark entire faces.
pub trait FloodRule<G: FloodGraph + ?Sized> {
    /// Called once when a flood starts at `seed`. Returns the seed face's depth.
    fn mark_seed_face(&mut self, graph: &mut G, seed: NodeId) -> i32;

    /// Called when the search crosses from `curr` (on a face with `depth`) to its mate `mate`,
    /// whose face has not been visited yet. Returns the new face's depth.
    fn step_into_face(&mut self, graph: &mut G, curr: NodeId, depth: i32, mate: NodeId) -> i32;
}

#[derive(Copy, Clone, Debug)]
struct Frame {
    seed: NodeId,
    curr: NodeId,
    depth: i32,
}

/// Depth-first face flood with an explicit frame stack.
///
/// Created over a mutable graph borrow; it takes a scratch visit mask from the graph for its
/// whole lifetime and returns it on drop. Faces stay visited across floods from different seeds,
/// so each face is entered at most once per searcher.
pub struct FloodSearcher<'g, G: FloodGraph + ?Sized, R> {
    graph: &'g mut G,
    rule: R,
    visit_mask: NodeMask,
    stack: Vec<Frame>,
}

impl<G: FloodGraph + ?Sized, R: core::fmt::Debug> core::fmt::Debug for FloodSearcher<'_, G, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FloodSearcher")
            .field("rule", &self.rule)
            .field("visit_mask", &self.visit_mask)
            .field("nodes", &self.graph.node_count())
            .finish_non_exhaustive()
    }
}

impl<'g, G: FloodGraph + ?Sized, R: FloodRule<G>> FloodSearcher<'g, G, R> {
    /// Create a searcher. Returns `None` when the graph has no scratch mask left.
    pub fn new(graph: &'g mut G, rule: R) -> Option<Self> {
        let visit_mask = graph.grab_mask()?;
        Some(Self {
            graph,
            rule,
            visit_mask,
            stack: Vec::new(),
        })
    }

    /// The rule, for reading results.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// The rule, mutably.
    pub fn rule_mut(&mut self) -> &mut R {
        &mut self.rule
    }

    /// The graph being searched.
    pub fn graph(&self) -> &G {
        &*self.graph
    }

    /// Whether the face containing `node` has been entered by this searcher.
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.graph.has_mask(node, self.visit_mask)
    }

    /// Flood every face reachable from the face containing `seed`.
    ///
    /// Returns the number of faces entered, or 0 when the seed face was already visited.
    pub fn flood_from_seed(&mut self, seed: NodeId) -> usize {
        let visit = self.visit_mask;
        if self.graph.has_mask(seed, visit) {
            return 0;
        }
        self.graph.set_mask_around_face(seed, visit);
        let depth = self.rule.mark_seed_face(&mut *self.graph, seed);
        trace!(seed = seed.index(), depth, "seed face");

        self.stack.clear();
        self.stack.push(Frame {
            seed,
            curr: seed,
            depth,
        });
        let mut faces = 1;
        while let Some(&top) = self.stack.last() {
            let mate = self.graph.mate(top.curr);
            if !self.graph.has_mask(mate, visit) {
                self.graph.set_mask_around_face(mate, visit);
                let depth = self
                    .rule
                    .step_into_face(&mut *self.graph, top.curr, top.depth, mate);
                trace!(face = mate.index(), depth, "entered face");
                self.stack.push(Frame {
                    seed: mate,
                    curr: mate,
                    depth,
                });
                faces += 1;
                continue;
            }
            let next = self.graph.face_successor(top.curr);
            if next == top.seed {
                self.stack.pop();
            } else if let Some(frame) = self.stack.last_mut() {
                frame.curr = next;
            }
        }
        faces
    }

    /// Flood from every face of negative signed area, most negative first.
    ///
    /// Outer faces (negative area) are the reliable exterior seeds; starting from the largest
    /// lets near-zero sliver faces be reached by propagation instead of being seeded themselves.
    /// Returns the number of floods that entered at least one face.
    pub fn run_flood_from_all_negative_area_faces(&mut self) -> usize {
        let seeds = self.negative_area_faces();
        let mut components = 0;
        for (area, seed) in seeds {
            let faces = self.flood_from_seed(seed);
            if faces > 0 {
                components += 1;
                debug!(seed = seed.index(), area, faces, "flooded component");
            }
        }
        components
    }

    /// One node per negative-area face, sorted by ascending area.
    fn negative_area_faces(&mut self) -> Vec<(f64, NodeId)> {
        let mut seeds = Vec::new();
        let Some(face_mask) = self.graph.grab_mask() else {
            warn!("no scratch mask left to enumerate faces");
            return seeds;
        };
        for i in 0..self.graph.node_count() {
            let node = NodeId::from_index(i);
            if self.graph.has_mask(node, face_mask) {
                continue;
            }
            self.graph.set_mask_around_face(node, face_mask);
            let area = self.graph.face_area(node);
            if area < 0.0 {
                seeds.push((area, node));
            }
        }
        self.graph.drop_mask(face_mask);
        seeds.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        seeds
    }
}

impl<G: FloodGraph + ?Sized, R> Drop for FloodSearcher<'_, G, R> {
    fn drop(&mut self) {
        self.graph.drop_mask(self.visit_mask);
    }
}
