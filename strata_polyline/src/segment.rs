// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded closest approach between two line segments.

use strata_index::Point3d;

/// Relative tolerance below which two points are treated as coincident.
pub const ALMOST_EQUAL_RELATIVE_TOLERANCE: f64 = 1.0e-10;

/// Relative size of `a * e - b * b` below which segments are treated as parallel.
const PARALLEL_RELATIVE_TOLERANCE: f64 = 1.0e-14;

/// Segment parameters `(fa, fb)` of the closest approach between segments `a0 a1` and `b0 b1`.
///
/// Both parameters are clamped to `[0, 1]`. Zero-length segments are handled; for parallel
/// segments one representative pair is returned.
pub fn segment_closest_approach(
    a0: Point3d,
    a1: Point3d,
    b0: Point3d,
    b1: Point3d,
) -> (f64, f64) {
    closest_fractions(a0, a1, b0, b1, 3)
}

/// Like [`segment_closest_approach`] but measured in the XY plane only.
pub fn segment_closest_approach_xy(
    a0: Point3d,
    a1: Point3d,
    b0: Point3d,
    b1: Point3d,
) -> (f64, f64) {
    closest_fractions(a0, a1, b0, b1, 2)
}

fn closest_fractions(
    a0: Point3d,
    a1: Point3d,
    b0: Point3d,
    b1: Point3d,
    dimensions: usize,
) -> (f64, f64) {
    let p = a0.to_array();
    let d1 = sub(a1.to_array(), p);
    let d2 = sub(b1.to_array(), b0.to_array());
    let r = sub(p, b0.to_array());

    let a = dot(&d1, &d1, dimensions);
    let e = dot(&d2, &d2, dimensions);
    let f = dot(&d2, &r, dimensions);

    if a <= 0.0 && e <= 0.0 {
        return (0.0, 0.0);
    }
    if a <= 0.0 {
        return (0.0, clamp01(f / e));
    }
    let c = dot(&d1, &r, dimensions);
    if e <= 0.0 {
        return (clamp01(-c / a), 0.0);
    }

    let b = dot(&d1, &d2, dimensions);
    let denom = a * e - b * b;
    let mut s = if denom > PARALLEL_RELATIVE_TOLERANCE * a * e {
        clamp01((b * f - c * e) / denom)
    } else {
        0.0
    };
    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = clamp01(-c / a);
    } else if t > 1.0 {
        t = 1.0;
        s = clamp01((b - c) / a);
    }
    (s, t)
}

/// Spatial distance.
pub fn distance(p: Point3d, q: Point3d) -> f64 {
    p.distance_squared(q).sqrt()
}

/// Planar distance, ignoring z.
pub fn distance_xy(p: Point3d, q: Point3d) -> f64 {
    p.distance_squared_xy(q).sqrt()
}

/// True when `p` and `q` coincide in XY up to round-off relative to their magnitude.
pub fn almost_equal_xy(p: Point3d, q: Point3d) -> bool {
    let scale = 1.0 + p.x.abs().max(p.y.abs()).max(q.x.abs()).max(q.y.abs());
    distance_xy(p, q) <= ALMOST_EQUAL_RELATIVE_TOLERANCE * scale
}

#[inline]
fn sub(u: [f64; 3], v: [f64; 3]) -> [f64; 3] {
    [u[0] - v[0], u[1] - v[1], u[2] - v[2]]
}

#[inline]
fn dot(u: &[f64; 3], v: &[f64; 3], dimensions: usize) -> f64 {
    u.iter().zip(v).take(dimensions).map(|(a, b)| a * b).sum()
}

#[inline]
fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
