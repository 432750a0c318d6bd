// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: points and axis-aligned ranges.

use core::fmt::Debug;

/// A point in 3D space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3d {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3d {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as an array.
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// The point at `fraction` along the segment from `self` to `other`.
    #[inline]
    pub fn interpolate(self, fraction: f64, other: Self) -> Self {
        Self {
            x: self.x + fraction * (other.x - self.x),
            y: self.y + fraction * (other.y - self.y),
            z: self.z + fraction * (other.z - self.z),
        }
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Squared distance to `other`, ignoring z.
    #[inline]
    pub fn distance_squared_xy(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Largest absolute coordinate.
    pub fn max_abs(self) -> f64 {
        abs(self.x).max(abs(self.y)).max(abs(self.z))
    }
}

impl From<[f64; 3]> for Point3d {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Point3d> for [f64; 3] {
    fn from(p: Point3d) -> Self {
        p.to_array()
    }
}

/// Axis-aligned range (box) in `N` dimensions.
///
/// A range is either
/// - *null*: the sentinel produced by [`Range::null`], with every low coordinate at `f64::MAX`
///   and every high coordinate at `-f64::MAX`. Extending a null range by a point yields exactly
///   that point.
/// - *empty*: `low > high` on at least one axis. Every null range is empty, but a range built with
///   [`Range::from_low_high`] from inverted corners is empty without being null.
/// - a regular (possibly degenerate) box.
///
/// Operations never fail: zero-count inputs produce the null sentinel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Range<const N: usize> {
    /// Low corner.
    pub low: [f64; N],
    /// High corner.
    pub high: [f64; N],
}

/// Planar range.
pub type Range2d = Range<2>;

/// Spatial range.
pub type Range3d = Range<3>;

impl<const N: usize> Default for Range<N> {
    fn default() -> Self {
        Self::NULL
    }
}

impl<const N: usize> Range<N> {
    /// The null sentinel.
    pub const NULL: Self = Self {
        low: [f64::MAX; N],
        high: [-f64::MAX; N],
    };

    /// The null sentinel.
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Create a range from raw corners. No reordering happens, so inverted corners give an
    /// empty (but not null) range.
    pub const fn from_low_high(low: [f64; N], high: [f64; N]) -> Self {
        Self { low, high }
    }

    /// Smallest range containing both corners.
    pub fn from_corners(a: [f64; N], b: [f64; N]) -> Self {
        let mut r = Self::NULL;
        r.extend_coords(a);
        r.extend_coords(b);
        r
    }

    /// Smallest range containing all coordinate tuples. Null when `coords` is empty.
    pub fn from_coords(coords: &[[f64; N]]) -> Self {
        let mut r = Self::NULL;
        for c in coords {
            r.extend_coords(*c);
        }
        r
    }

    /// True only for the exact null sentinel.
    pub fn is_null(&self) -> bool {
        self.low.iter().all(|&v| v == f64::MAX) && self.high.iter().all(|&v| v == -f64::MAX)
    }

    /// True when `low > high` on any axis. Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        self.low.iter().zip(self.high.iter()).any(|(l, h)| l > h)
    }

    /// True when the range is a single point.
    pub fn is_point(&self) -> bool {
        !self.is_empty() && self.low == self.high
    }

    /// Size along `axis`, zero for empty ranges.
    pub fn extent(&self, axis: usize) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.high[axis] - self.low[axis]
        }
    }

    /// Product of the extents (area in 2D, volume in 3D). Zero for empty ranges.
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (0..N).map(|i| self.high[i] - self.low[i]).product()
    }

    /// Midpoint of the range. Meaningless for empty ranges.
    pub fn center(&self) -> [f64; N] {
        let mut c = [0.0; N];
        for (i, v) in c.iter_mut().enumerate() {
            *v = 0.5 * (self.low[i] + self.high[i]);
        }
        c
    }

    /// Grow the range to include a coordinate tuple.
    pub fn extend_coords(&mut self, coords: [f64; N]) {
        for (i, &v) in coords.iter().enumerate() {
            if v < self.low[i] {
                self.low[i] = v;
            }
            if v > self.high[i] {
                self.high[i] = v;
            }
        }
    }

    /// Grow the range to include `other`. Empty ranges contribute nothing.
    pub fn extend_by_range(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        for i in 0..N {
            self.low[i] = self.low[i].min(other.low[i]);
            self.high[i] = self.high[i].max(other.high[i]);
        }
    }

    /// Smallest range containing both ranges.
    pub fn union(&self, other: &Self) -> Self {
        let mut r = *self;
        r.extend_by_range(other);
        r
    }

    /// Overlap of two ranges, or `None` if they are disjoint or either is empty.
    ///
    /// Touching ranges overlap in a degenerate (zero-extent) range.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let mut r = Self::NULL;
        for i in 0..N {
            r.low[i] = self.low[i].max(other.low[i]);
            r.high[i] = self.high[i].min(other.high[i]);
            if r.low[i] > r.high[i] {
                return None;
            }
        }
        Some(r)
    }

    /// True when the coordinate tuple is inside or on the boundary.
    pub fn contains_coords(&self, coords: [f64; N]) -> bool {
        (0..N).all(|i| self.low[i] <= coords[i] && coords[i] <= self.high[i])
    }

    /// True when `self` is non-empty and lies entirely within `outer`.
    pub fn is_contained_in(&self, outer: &Self) -> bool {
        !self.is_empty()
            && !outer.is_empty()
            && (0..N).all(|i| outer.low[i] <= self.low[i] && self.high[i] <= outer.high[i])
    }

    /// Tolerant overlap test on the first `dimensions` axes.
    ///
    /// The ranges are considered separated only if, on some tested axis, the gap between them
    /// exceeds `tolerance`. `dimensions` is clamped to `N`, so a 3D range can be tested in XY only
    /// by passing `2`. Empty ranges never intersect anything.
    pub fn intersects_with(&self, other: &Self, tolerance: f64, dimensions: usize) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (0..dimensions.min(N)).all(|i| {
            self.low[i] <= other.high[i] + tolerance && other.low[i] <= self.high[i] + tolerance
        })
    }
}

impl Range<2> {
    /// Create a planar range from raw corners (see [`Range::from_low_high`]).
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::from_low_high([x0, y0], [x1, y1])
    }

    /// True when `(x, y)` is inside or on the boundary.
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        self.contains_coords([x, y])
    }

    /// One of the four quadrants split at the center.
    ///
    /// Quadrants are numbered `0: low x low y`, `1: high x low y`, `2: low x high y`,
    /// `3: high x high y`.
    pub fn quadrant(&self, quadrant: usize) -> Self {
        let [cx, cy] = self.center();
        let (x0, x1) = if quadrant & 1 == 0 {
            (self.low[0], cx)
        } else {
            (cx, self.high[0])
        };
        let (y0, y1) = if quadrant & 2 == 0 {
            (self.low[1], cy)
        } else {
            (cy, self.high[1])
        };
        Self::new(x0, y0, x1, y1)
    }
}

impl Range<3> {
    /// Smallest range containing all points. Null when `points` is empty.
    pub fn from_points(points: &[Point3d]) -> Self {
        let mut r = Self::NULL;
        for p in points {
            r.extend_coords(p.to_array());
        }
        r
    }

    /// Grow the range to include a point.
    pub fn extend_point(&mut self, point: Point3d) {
        self.extend_coords(point.to_array());
    }

    /// True when the point is inside or on the boundary.
    pub fn contains_point(&self, point: Point3d) -> bool {
        self.contains_coords(point.to_array())
    }

    /// The same range with its z extent collapsed to `[0, 0]`.
    ///
    /// Used to build planar-only hierarchies out of 3D data. Empty ranges are returned unchanged.
    pub fn with_z_flattened(&self) -> Self {
        if self.is_empty() {
            return *self;
        }
        let mut r = *self;
        r.low[2] = 0.0;
        r.high[2] = 0.0;
        r
    }

    /// The XY projection.
    pub fn xy(&self) -> Range2d {
        Range2d::from_low_high([self.low[0], self.low[1]], [self.high[0], self.high[1]])
    }
}

#[inline]
fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}
