// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembling a [`PlanarGraph`] from vertices and edges.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use kurbo::Point;
use tracing::debug;

use crate::graph::PlanarGraph;
use crate::types::{NodeId, NodeMask};

/// Builder for [`PlanarGraph`].
///
/// Edges must not cross or overlap each other except at shared vertices; splitting crossing
/// input is the caller's job. Vertices with identical coordinates are merged.
///
/// Edge `e` from `v0` to `v1` becomes node `2e` (leaving `v0`) and node `2e + 1` (leaving `v1`).
/// Around each vertex the outgoing half-edges are ordered by angle, and each face successor is
/// the half-edge immediately clockwise from the arriving edge's mate, so that every face lies to
/// the left of its half-edges.
#[derive(Clone, Debug, Default)]
pub struct PlanarGraphBuilder {
    vertices: Vec<Point>,
    lookup: BTreeMap<[u64; 2], usize>,
    edges: Vec<Edge>,
}

#[derive(Clone, Copy, Debug)]
struct Edge {
    v0: usize,
    v1: usize,
    left: NodeMask,
    right: NodeMask,
}

impl PlanarGraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, or find the existing vertex at the same coordinates. Returns its index.
    pub fn add_vertex(&mut self, point: Point) -> usize {
        let key = [canonical_bits(point.x), canonical_bits(point.y)];
        if let Some(&v) = self.lookup.get(&key) {
            return v;
        }
        let v = self.vertices.len();
        self.vertices.push(point);
        self.lookup.insert(key, v);
        v
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add an edge from `v0` to `v1`.
    ///
    /// `left` is stored on the half-edge leaving `v0` (whose face lies left of the direction
    /// `v0 -> v1`); `right` on its mate. Returns `false`, adding nothing, for an unknown vertex
    /// or when `v0 == v1`.
    pub fn add_edge(&mut self, v0: usize, v1: usize, left: NodeMask, right: NodeMask) -> bool {
        if v0 == v1 || v0 >= self.vertices.len() || v1 >= self.vertices.len() {
            return false;
        }
        self.edges.push(Edge {
            v0,
            v1,
            left,
            right,
        });
        true
    }

    /// Add a closed polygon. Returns the number of edges added.
    ///
    /// `interior` is stored on the half-edges whose face is inside the polygon and `exterior` on
    /// their mates, whatever the winding direction of `points`. Repeated consecutive points
    /// (including a closing point equal to the first) are skipped.
    pub fn add_polygon(
        &mut self,
        points: &[Point],
        interior: NodeMask,
        exterior: NodeMask,
    ) -> usize {
        let (left, right) = if polygon_area(points) >= 0.0 {
            (interior, exterior)
        } else {
            (exterior, interior)
        };
        let ids: Vec<usize> = points.iter().map(|&p| self.add_vertex(p)).collect();
        let mut added = 0;
        for (i, &v0) in ids.iter().enumerate() {
            let v1 = ids[(i + 1) % ids.len()];
            if self.add_edge(v0, v1, left, right) {
                added += 1;
            }
        }
        added
    }

    /// Link the half-edges and produce the graph.
    pub fn build(self) -> PlanarGraph {
        let node_count = 2 * self.edges.len();
        let mut points = Vec::with_capacity(node_count);
        let mut mates = Vec::with_capacity(node_count);
        let mut masks = Vec::with_capacity(node_count);
        let mut origin = Vec::with_capacity(node_count);
        for (e, edge) in self.edges.iter().enumerate() {
            points.push(self.vertices[edge.v0]);
            points.push(self.vertices[edge.v1]);
            mates.push(NodeId::from_index(2 * e + 1));
            mates.push(NodeId::from_index(2 * e));
            masks.push(edge.left);
            masks.push(edge.right);
            origin.push(edge.v0);
            origin.push(edge.v1);
        }

        // Outgoing half-edges per vertex, counterclockwise by angle.
        let mut outgoing: Vec<Vec<(f64, NodeId)>> =
            alloc::vec![Vec::new(); self.vertices.len()];
        for n in 0..node_count {
            let mate = mates[n].index();
            let angle = (points[mate] - points[n]).atan2();
            outgoing[origin[n]].push((angle, NodeId::from_index(n)));
        }
        let mut position = alloc::vec![0_usize; node_count];
        for around in &mut outgoing {
            around.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            for (k, &(_, n)) in around.iter().enumerate() {
                position[n.index()] = k;
            }
        }

        let fsuccs = (0..node_count)
            .map(|n| {
                let twin = mates[n].index();
                let around = &outgoing[origin[twin]];
                let k = position[twin];
                around[(k + around.len() - 1) % around.len()].1
            })
            .collect();

        debug!(
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            "built planar graph"
        );
        PlanarGraph::from_parts(points, mates, fsuccs, masks)
    }
}

/// Bits of a coordinate with `-0.0` folded onto `0.0`.
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() }
}

fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        twice_area += points[i].to_vec2().cross(points[(i + 1) % n].to_vec2());
    }
    0.5 * twice_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FloodGraph;

    #[test]
    fn vertices_are_merged_by_coordinates() {
        let mut b = PlanarGraphBuilder::new();
        let a = b.add_vertex(Point::new(1.0, 2.0));
        let c = b.add_vertex(Point::new(0.0, 0.0));
        assert_eq!(b.add_vertex(Point::new(1.0, 2.0)), a);
        assert_eq!(b.add_vertex(Point::new(-0.0, 0.0)), c);
        assert_eq!(b.vertex_count(), 2);
    }

    #[test]
    fn degenerate_edges_are_rejected() {
        let mut b = PlanarGraphBuilder::new();
        let v = b.add_vertex(Point::new(1.0, 1.0));
        assert!(!b.add_edge(v, v, NodeMask::empty(), NodeMask::empty()));
        assert!(!b.add_edge(v, 7, NodeMask::empty(), NodeMask::empty()));
        assert_eq!(b.edge_count(), 0);
        assert!(b.build().is_empty());
    }

    #[test]
    fn clockwise_polygon_keeps_interior_on_the_inside() {
        let mut b = PlanarGraphBuilder::new();
        let added = b.add_polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(0.0, 2.0),
                Point::new(2.0, 2.0),
                Point::new(2.0, 0.0),
                Point::new(0.0, 0.0),
            ],
            NodeMask::BOUNDARY,
            NodeMask::BOUNDARY | NodeMask::SINGLE_EXTERIOR,
        );
        assert_eq!(added, 4);
        let g = b.build();
        for face in g.faces() {
            let outside = g.has_mask(face, NodeMask::SINGLE_EXTERIOR);
            assert_eq!(outside, g.face_area(face) < 0.0);
            assert!(
                g.face_loop(face)
                    .iter()
                    .all(|&n| g.has_mask(n, NodeMask::SINGLE_EXTERIOR) == outside),
                "face ring has mixed sides"
            );
        }
    }

    #[test]
    fn face_successors_walk_vertex_fans() {
        // Two triangles sharing the edge (1,0)-(0,1).
        let mut b = PlanarGraphBuilder::new();
        let p = [
            b.add_vertex(Point::new(0.0, 0.0)),
            b.add_vertex(Point::new(1.0, 0.0)),
            b.add_vertex(Point::new(0.0, 1.0)),
            b.add_vertex(Point::new(1.0, 1.0)),
        ];
        let m = NodeMask::empty();
        for (a, c) in [(0, 1), (1, 2), (2, 0), (1, 3), (3, 2)] {
            assert!(b.add_edge(p[a], p[c], m, m));
        }
        let g = b.build();
        assert_eq!(g.face_count(), 3);
        let mut areas: Vec<f64> = g.faces().iter().map(|&f| g.face_area(f)).collect();
        areas.sort_by(f64::total_cmp);
        assert_eq!(areas, [-1.0, 0.5, 0.5]);
    }
}
