// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Flood: classify the faces of a planar half-edge graph by flooding across edges.
//!
//! A flood starts at a seed face and walks to neighboring faces through edge mates, carrying an
//! integer depth. A [`FloodRule`] decides how the depth changes at each crossing and which faces
//! get marked:
//!
//! - [`ParityRule`]: even-odd fill across boundary edges.
//! - [`UnionRule`]: winding count against a threshold, for unions of overlapping regions.
//! - [`WindingCollector`]: the raw winding count of every face, without writing masks.
//!
//! [`FloodSearcher`] owns the traversal. It uses an explicit stack, so very long chains of
//! adjacent faces cannot overflow the call stack, and records visits in a scratch mask bit taken
//! from the graph, so no side table is needed.
//!
//! Any graph exposing [`FloodGraph`] can be searched. [`PlanarGraph`], assembled with
//! [`PlanarGraphBuilder`], is the provided implementation.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use strata_flood::{FloodGraph, NodeMask, PlanarGraphBuilder, mark_exterior_by_parity};
//!
//! let mut builder = PlanarGraphBuilder::new();
//! let square = [
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ];
//! builder.add_polygon(&square, NodeMask::BOUNDARY, NodeMask::BOUNDARY);
//! let mut graph = builder.build();
//!
//! assert_eq!(mark_exterior_by_parity(&mut graph), 1);
//! for face in graph.faces() {
//!     let outside = graph.face_area(face) < 0.0;
//!     assert_eq!(graph.has_mask(face, NodeMask::EXTERIOR), outside);
//! }
//! ```
//!
//! ### Float semantics
//!
//! Coordinates must not be NaN. Faces with fewer than three nodes have zero area and are never
//! used as seeds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod builder;
pub mod graph;
pub mod rules;
pub mod searcher;
pub mod types;

pub use builder::PlanarGraphBuilder;
pub use graph::{FloodGraph, PlanarGraph};
pub use rules::{
    ParityRule, UnionRule, WindingCollector, collect_winding_numbers, mark_exterior_by_parity,
    mark_exterior_by_union,
};
pub use searcher::{FloodRule, FloodSearcher};
pub use types::{NodeId, NodeMask};
