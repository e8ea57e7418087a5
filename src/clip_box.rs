// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An axis-aligned clipping region, possibly unbounded.

use core::fmt;
use core::ops::Mul;

use arrayvec::ArrayVec;

use crate::{ACCURACY, Affine, LineSpan, Point, Vec2, point::near};

/// An axis-aligned rectangle, each bound independently possibly infinite.
///
/// The constructors sort each coordinate pair, so `x0 <= x1` and
/// `y0 <= y1` always hold and a degenerate "inside-out" box cannot be
/// built. A box with all four bounds infinite covers the whole plane; a
/// box with some bounds infinite is a half-plane, slab or quadrant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipBox {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl ClipBox {
    /// The box covering the entire plane.
    pub const INFINITE: ClipBox = ClipBox {
        x0: f64::NEG_INFINITY,
        y0: f64::NEG_INFINITY,
        x1: f64::INFINITY,
        y1: f64::INFINITY,
    };

    /// The empty box at the origin.
    pub const ZERO: ClipBox = ClipBox {
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    };

    /// A new box from two x bounds and two y bounds, in either order.
    ///
    /// Each pair is sorted, so the result always has `x0 <= x1` and
    /// `y0 <= y1`.
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> ClipBox {
        ClipBox {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// A new box spanning two corner points.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> ClipBox {
        let p0 = p0.into();
        let p1 = p1.into();
        ClipBox::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// The minimum x bound.
    #[inline(always)]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// The minimum y bound.
    #[inline(always)]
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// The maximum x bound.
    #[inline(always)]
    pub fn x1(&self) -> f64 {
        self.x1
    }

    /// The maximum y bound.
    #[inline(always)]
    pub fn y1(&self) -> f64 {
        self.y1
    }

    /// The width of the box, infinite when an x bound is infinite.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the box, infinite when a y bound is infinite.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the box.
    ///
    /// Not meaningful (NaN) for directions in which the box is fully
    /// unbounded.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// Are all four bounds finite?
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Does the box contain `p`? The boundary counts as inside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    /// Does `p` lie on the boundary of the box, within [`ACCURACY`]?
    pub fn on_boundary(&self, p: Point) -> bool {
        let on_x = (p.x - self.x0).abs() < ACCURACY || (p.x - self.x1).abs() < ACCURACY;
        let on_y = (p.y - self.y0).abs() < ACCURACY || (p.y - self.y1).abs() < ACCURACY;
        let in_x = p.x > self.x0 - ACCURACY && p.x < self.x1 + ACCURACY;
        let in_y = p.y > self.y0 - ACCURACY && p.y < self.y1 + ACCURACY;
        (on_x && in_y) || (on_y && in_x)
    }

    /// Does the box contain every vertex of the other box?
    ///
    /// An unbounded `other` is only contained if this box is unbounded in
    /// the same directions.
    pub fn contains_box(&self, other: &ClipBox) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// The smallest box covering both boxes.
    #[inline]
    pub fn union(&self, other: &ClipBox) -> ClipBox {
        ClipBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// The overlap of two boxes.
    ///
    /// Disjoint boxes yield an empty (zero width or height) box on the
    /// shared bound rather than an inverted one.
    #[inline]
    pub fn intersect(&self, other: &ClipBox) -> ClipBox {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        ClipBox {
            x0,
            y0,
            x1: self.x1.min(other.x1).max(x0),
            y1: self.y1.min(other.y1).max(y0),
        }
    }

    /// The boundary of the box as up to four linear spans, in consistent
    /// winding order: bottom (+x), right (+y), top (-x), left (-y).
    ///
    /// A bound that is infinite contributes no edge; a finite bound whose
    /// perpendicular neighbors are infinite contributes a full line or a
    /// ray. A fully unbounded box has no edges at all.
    pub fn edges(&self) -> ArrayVec<LineSpan, 4> {
        let mut edges = ArrayVec::new();
        if self.y0.is_finite() {
            edges.push(LineSpan::new(
                Point::new(0.0, self.y0),
                Vec2::new(1.0, 0.0),
                self.x0..self.x1,
            ));
        }
        if self.x1.is_finite() {
            edges.push(LineSpan::new(
                Point::new(self.x1, 0.0),
                Vec2::new(0.0, 1.0),
                self.y0..self.y1,
            ));
        }
        if self.y1.is_finite() {
            edges.push(LineSpan::new(
                Point::new(0.0, self.y1),
                Vec2::new(-1.0, 0.0),
                -self.x1..-self.x0,
            ));
        }
        if self.x0.is_finite() {
            edges.push(LineSpan::new(
                Point::new(self.x0, 0.0),
                Vec2::new(0.0, -1.0),
                -self.y1..-self.y0,
            ));
        }
        edges
    }

    /// The corners where two finite bounds meet, in scan order:
    /// `(x0, y0)`, `(x1, y0)`, `(x0, y1)`, `(x1, y1)`.
    pub fn vertices(&self) -> ArrayVec<Point, 4> {
        let mut vertices = ArrayVec::new();
        let (fx0, fx1) = (self.x0.is_finite(), self.x1.is_finite());
        let (fy0, fy1) = (self.y0.is_finite(), self.y1.is_finite());
        if fx0 && fy0 {
            vertices.push(Point::new(self.x0, self.y0));
        }
        if fx1 && fy0 {
            vertices.push(Point::new(self.x1, self.y0));
        }
        if fx0 && fy1 {
            vertices.push(Point::new(self.x0, self.y1));
        }
        if fx1 && fy1 {
            vertices.push(Point::new(self.x1, self.y1));
        }
        vertices
    }

    /// Equality of all four bounds up to [`ACCURACY`]; matching infinite
    /// bounds compare equal.
    pub fn approx_eq(&self, other: &ClipBox) -> bool {
        near(self.x0, other.x0)
            && near(self.y0, other.y0)
            && near(self.x1, other.x1)
            && near(self.y1, other.y1)
    }
}

impl Mul<ClipBox> for Affine {
    type Output = ClipBox;

    /// The bounding box of the transformed box.
    ///
    /// For an axis-aligned transform this is exact. Any box with an
    /// infinite bound maps to the fully infinite box, since a general
    /// affine map spreads the unbounded direction across both axes.
    fn mul(self, other: ClipBox) -> ClipBox {
        if !other.is_bounded() {
            return ClipBox::INFINITE;
        }
        let p00 = self * Point::new(other.x0, other.y0);
        let p01 = self * Point::new(other.x0, other.y1);
        let p10 = self * Point::new(other.x1, other.y0);
        let p11 = self * Point::new(other.x1, other.y1);
        ClipBox::from_points(p00, p01).union(&ClipBox::from_points(p10, p11))
    }
}

impl fmt::Display for ClipBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]\u{d7}[{}, {}]",
            self.x0, self.x1, self.y0, self.y1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamCurve;

    #[test]
    fn construction_sorts_bounds() {
        let b = ClipBox::new(10.0, 5.0, 2.0, 5.0);
        assert_eq!(b.x0(), 2.0);
        assert_eq!(b.x1(), 10.0);
        assert_eq!(b.y0(), 5.0);
        assert_eq!(b.y1(), 5.0);
    }

    #[test]
    fn containment_is_boundary_inclusive() {
        let b = ClipBox::new(-1.0, -1.0, 1.0, 1.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(1.0, 1.0)));
        assert!(b.contains(Point::new(-1.0, 0.5)));
        assert!(!b.contains(Point::new(1.0 + 1e-9, 0.0)));
    }

    #[test]
    fn on_boundary() {
        let b = ClipBox::new(-1.0, -1.0, 1.0, 1.0);
        assert!(b.on_boundary(Point::new(1.0, 0.0)));
        assert!(b.on_boundary(Point::new(1.0, 1.0)));
        assert!(b.on_boundary(Point::new(0.5, -1.0)));
        assert!(!b.on_boundary(Point::new(0.0, 0.0)));
        assert!(!b.on_boundary(Point::new(1.0, 2.0)));
        // points on the supporting line but outside the edge extent
        assert!(!b.on_boundary(Point::new(3.0, 1.0)));
    }

    #[test]
    fn bounded_box_edges_wind_consistently() {
        let b = ClipBox::new(0.0, 0.0, 2.0, 1.0);
        let edges = b.edges();
        assert_eq!(edges.len(), 4);
        // each edge starts where the previous one ends
        for i in 0..4 {
            let here = edges[i].end();
            let next = edges[(i + 1) % 4].start();
            assert!(here.approx_eq(next), "{here:?} != {next:?}");
        }
        assert_eq!(edges[0].start(), Point::new(0.0, 0.0));
        assert_eq!(edges[0].end(), Point::new(2.0, 0.0));
    }

    #[test]
    fn unbounded_box_edges() {
        // half-plane y <= 1: one full line
        let half = ClipBox::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY, 1.0);
        let edges = half.edges();
        assert_eq!(edges.len(), 1);
        assert!(!edges[0].is_bounded());
        assert_eq!(half.vertices().len(), 0);

        // quadrant x >= 0, y >= 0: two rays, one vertex
        let quad = ClipBox::new(0.0, 0.0, f64::INFINITY, f64::INFINITY);
        assert_eq!(quad.edges().len(), 2);
        assert_eq!(quad.vertices().len(), 1);
        assert_eq!(quad.vertices()[0], Point::new(0.0, 0.0));

        // the whole plane has no boundary
        assert_eq!(ClipBox::INFINITE.edges().len(), 0);
        assert_eq!(ClipBox::INFINITE.vertices().len(), 0);
        assert!(ClipBox::INFINITE.contains(Point::new(1e300, -1e300)));
    }

    #[test]
    fn union_intersect() {
        let a = ClipBox::new(0.0, 0.0, 2.0, 2.0);
        let b = ClipBox::new(1.0, 1.0, 3.0, 3.0);
        assert_eq!(a.union(&b), ClipBox::new(0.0, 0.0, 3.0, 3.0));
        assert_eq!(a.intersect(&b), ClipBox::new(1.0, 1.0, 2.0, 2.0));
        // disjoint boxes intersect to an empty box, never an inverted one
        let c = ClipBox::new(5.0, 5.0, 6.0, 6.0);
        let empty = a.intersect(&c);
        assert_eq!(empty.width(), 0.0);
    }

    #[test]
    fn transform_bounded_box() {
        let b = ClipBox::new(0.0, 0.0, 2.0, 1.0);
        let moved = Affine::translate((1.0, 1.0)) * b;
        assert!(moved.approx_eq(&ClipBox::new(1.0, 1.0, 3.0, 2.0)));
        let rotated = Affine::rotate(std::f64::consts::PI / 2.0) * b;
        assert!(rotated.approx_eq(&ClipBox::new(-1.0, 0.0, 0.0, 2.0)));
        assert_eq!(Affine::rotate(0.3) * ClipBox::INFINITE, ClipBox::INFINITE);
    }
}
