// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graph capability used by flood searches, and an arena-backed half-edge graph.

use alloc::vec::Vec;
use kurbo::Point;

use crate::types::{NodeId, NodeMask};

/// Capabilities a planar half-edge graph exposes to a flood search.
///
/// A node is a half-edge leaving a vertex. Its [`mate`](Self::mate) is the half-edge running the
/// other way along the same edge, and its [`face_successor`](Self::face_successor) is the next
/// half-edge around the face lying to its left. Bounded faces therefore run counterclockwise and
/// have positive [`face_area`](Self::face_area); the outer face of each connected component runs
/// clockwise and has negative area.
///
/// Implementations are trusted: inconsistent mates or successor rings are not detected.
pub trait FloodGraph {
    /// Number of nodes. Node ids are `0..node_count`.
    fn node_count(&self) -> usize;

    /// The half-edge running the other way along the same edge.
    fn mate(&self, node: NodeId) -> NodeId;

    /// The next half-edge around the face to the left of `node`.
    fn face_successor(&self, node: NodeId) -> NodeId;

    /// Mask bits of a node.
    fn mask(&self, node: NodeId) -> NodeMask;

    /// Set bits on a node.
    fn set_mask(&mut self, node: NodeId, mask: NodeMask);

    /// Clear bits on a node.
    fn clear_mask(&mut self, node: NodeId, mask: NodeMask);

    /// Coordinates of the vertex a node leaves from.
    fn point(&self, node: NodeId) -> Point;

    /// Take a scratch bit out of the graph's pool, cleared on every node.
    ///
    /// Returns `None` when the pool is exhausted.
    fn grab_mask(&mut self) -> Option<NodeMask>;

    /// Return a scratch bit obtained from [`grab_mask`](Self::grab_mask).
    fn drop_mask(&mut self, mask: NodeMask);

    /// True when any bit of `mask` is set on `node`.
    fn has_mask(&self, node: NodeId, mask: NodeMask) -> bool {
        self.mask(node).intersects(mask)
    }

    /// Set `mask` on every node of the face containing `seed`.
    fn set_mask_around_face(&mut self, seed: NodeId, mask: NodeMask) {
        let mut node = seed;
        loop {
            self.set_mask(node, mask);
            node = self.face_successor(node);
            if node == seed {
                break;
            }
        }
    }

    /// Clear `mask` on every node.
    fn clear_mask_in_set(&mut self, mask: NodeMask) {
        for i in 0..self.node_count() {
            self.clear_mask(NodeId::from_index(i), mask);
        }
    }

    /// Signed area of the face containing `seed`. Faces with fewer than three nodes have zero area.
    fn face_area(&self, seed: NodeId) -> f64 {
        let mut twice_area = 0.0;
        let mut count = 0_usize;
        let mut node = seed;
        loop {
            let next = self.face_successor(node);
            twice_area += self.point(node).to_vec2().cross(self.point(next).to_vec2());
            count += 1;
            node = next;
            if node == seed {
                break;
            }
        }
        if count < 3 { 0.0 } else { 0.5 * twice_area }
    }
}

#[derive(Clone, Debug)]
struct Node {
    point: Point,
    mate: NodeId,
    fsucc: NodeId,
    mask: NodeMask,
}

/// Arena-backed planar half-edge graph.
///
/// Built with [`PlanarGraphBuilder`](crate::PlanarGraphBuilder). Topology is fixed once built;
/// only mask bits change afterwards.
#[derive(Clone)]
pub struct PlanarGraph {
    nodes: Vec<Node>,
    free_masks: NodeMask,
}

impl core::fmt::Debug for PlanarGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlanarGraph")
            .field("nodes", &self.nodes.len())
            .field("free_masks", &self.free_masks)
            .finish_non_exhaustive()
    }
}

impl Default for PlanarGraph {
    fn default() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }
}

impl PlanarGraph {
    /// Assemble a graph from per-node coordinates, mates, face successors and initial masks.
    pub(crate) fn from_parts(
        points: Vec<Point>,
        mates: Vec<NodeId>,
        fsuccs: Vec<NodeId>,
        masks: Vec<NodeMask>,
    ) -> Self {
        debug_assert_eq!(points.len(), mates.len(), "one mate per node");
        debug_assert_eq!(points.len(), fsuccs.len(), "one face successor per node");
        debug_assert_eq!(points.len(), masks.len(), "one mask per node");
        let nodes = points
            .into_iter()
            .zip(mates)
            .zip(fsuccs)
            .zip(masks)
            .map(|(((point, mate), fsucc), mask)| Node {
                point,
                mate,
                fsucc,
                mask: mask.difference(NodeMask::SCRATCH),
            })
            .collect();
        Self {
            nodes,
            free_masks: NodeMask::SCRATCH,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of every node in index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Nodes of the face containing `seed`, starting at `seed`.
    pub fn face_loop(&self, seed: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut node = seed;
        loop {
            out.push(node);
            node = self.nodes[node.index()].fsucc;
            if node == seed {
                break;
            }
        }
        out
    }

    /// One node per face: the lowest-indexed node on each face ring.
    pub fn faces(&self) -> Vec<NodeId> {
        let mut seen = alloc::vec![false; self.nodes.len()];
        let mut out = Vec::new();
        for i in 0..self.nodes.len() {
            if seen[i] {
                continue;
            }
            let seed = NodeId::from_index(i);
            for node in self.face_loop(seed) {
                seen[node.index()] = true;
            }
            out.push(seed);
        }
        out
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces().len()
    }
}

impl FloodGraph for PlanarGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn mate(&self, node: NodeId) -> NodeId {
        self.nodes[node.index()].mate
    }

    fn face_successor(&self, node: NodeId) -> NodeId {
        self.nodes[node.index()].fsucc
    }

    fn mask(&self, node: NodeId) -> NodeMask {
        self.nodes[node.index()].mask
    }

    fn set_mask(&mut self, node: NodeId, mask: NodeMask) {
        self.nodes[node.index()].mask.insert(mask);
    }

    fn clear_mask(&mut self, node: NodeId, mask: NodeMask) {
        self.nodes[node.index()].mask.remove(mask);
    }

    fn point(&self, node: NodeId) -> Point {
        self.nodes[node.index()].point
    }

    fn grab_mask(&mut self) -> Option<NodeMask> {
        let mask = self.free_masks.iter().next()?;
        self.free_masks.remove(mask);
        self.clear_mask_in_set(mask);
        Some(mask)
    }

    fn drop_mask(&mut self, mask: NodeMask) {
        debug_assert!(
            NodeMask::SCRATCH.contains(mask) && !self.free_masks.intersects(mask),
            "returned mask was not grabbed"
        );
        self.free_masks.insert(mask & NodeMask::SCRATCH);
    }
}
