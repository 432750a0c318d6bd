// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Polyline: close approaches and intersections between polylines.
//!
//! A polyline is a slice of [`Point3d`]; segment `i` joins point `i` to point `i + 1`. Searches
//! report [`CloseApproach`] pairs locating the nearest points of two segments:
//!
//! - [`add_close_approaches`]: every segment pair within a distance, measured in 3D.
//! - [`collect_intersections_and_close_approaches_xy`]: the same in the XY plane, where
//!   coincident points count as intersections.
//! - [`closest_approach`] and [`closest_approach_xy`]: the single nearest pair.
//!
//! Small inputs test every segment pair. Larger ones are indexed with a
//! [`strata_index::IndexedRangeHeap`] per polyline and searched pairwise, pruning node pairs whose
//! ranges are too far apart. [`CloseApproachOptions`] controls where that switch happens.
//!
//! # Example
//!
//! ```rust
//! use strata_index::Point3d;
//! use strata_polyline::{CloseApproachOptions, add_close_approaches};
//!
//! let a = [Point3d::new(0.0, 0.0, 0.0), Point3d::new(10.0, 0.0, 0.0)];
//! let b = [Point3d::new(5.0, -1.0, 0.0), Point3d::new(5.0, 1.0, 0.0)];
//! let hits = add_close_approaches(&a, None, &b, None, 0.0, &CloseApproachOptions::default());
//!
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].a.fraction, 0.5);
//! assert_eq!(hits[0].a.point, Point3d::new(5.0, 0.0, 0.0));
//! ```
//!
//! Searches log through [`tracing`] at `debug` (one event per search) and `trace` (one event per
//! accepted segment pair).

pub mod ranges;
pub mod search;
pub mod segment;
pub mod types;

pub use ranges::PolylineRanges;
pub use search::{
    add_close_approaches, closest_approach, closest_approach_xy,
    collect_intersections_and_close_approaches_xy,
};
pub use segment::{segment_closest_approach, segment_closest_approach_xy};
pub use strata_index::Point3d;
pub use types::{CloseApproach, CloseApproachOptions, CurveLocationDetail, SearchStrategy};
