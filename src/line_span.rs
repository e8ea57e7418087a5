// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear spans: segments, rays and straight lines.

use core::ops::{Mul, Range};

use smallvec::SmallVec;

use crate::{
    ACCURACY, Affine, ClipBox, ContinuousCurve, Nearest, ParamCurve, PathSink, Point,
    UnboundedCurveError, Vec2, point::near,
};

/// A portion of a straight line, parametrized as `origin + t * dir` over
/// `[t0, t1]`.
///
/// Either parameter bound may be infinite, so a single representation
/// covers line segments (`[0, 1]`), rays (`[0, +∞)`), inverted rays
/// (`(-∞, 0]`) and full lines (`(-∞, +∞)`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSpan {
    /// The point at parameter zero.
    pub origin: Point,
    /// The direction of the span; not necessarily normalized.
    pub dir: Vec2,
    /// The lower parameter bound.
    pub t0: f64,
    /// The upper parameter bound.
    pub t1: f64,
}

impl LineSpan {
    /// A span of the line `origin + t * dir` over the given parameter
    /// range, which must be ordered (`start <= end`).
    #[inline]
    pub fn new(origin: impl Into<Point>, dir: impl Into<Vec2>, range: Range<f64>) -> LineSpan {
        LineSpan {
            origin: origin.into(),
            dir: dir.into(),
            t0: range.start,
            t1: range.end,
        }
    }

    /// The line segment from `p0` to `p1`, over `[0, 1]`.
    #[inline]
    pub fn segment(p0: impl Into<Point>, p1: impl Into<Point>) -> LineSpan {
        let p0 = p0.into();
        let p1 = p1.into();
        LineSpan::new(p0, p1 - p0, 0.0..1.0)
    }

    /// The ray from `origin` in direction `dir`, over `[0, +∞)`.
    #[inline]
    pub fn ray(origin: impl Into<Point>, dir: impl Into<Vec2>) -> LineSpan {
        LineSpan::new(origin, dir, 0.0..f64::INFINITY)
    }

    /// The full straight line through `origin` with direction `dir`.
    #[inline]
    pub fn line(origin: impl Into<Point>, dir: impl Into<Vec2>) -> LineSpan {
        LineSpan::new(origin, dir, f64::NEG_INFINITY..f64::INFINITY)
    }

    /// The full line carrying this span.
    #[inline]
    pub fn supporting_line(&self) -> LineSpan {
        LineSpan::line(self.origin, self.dir)
    }

    /// The length of the span; infinite when a parameter bound is.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.t1 - self.t0) * self.dir.hypot()
    }

    /// The unclamped position of the projection of `p` onto the
    /// supporting line.
    #[inline]
    pub fn position_on_line(&self, p: Point) -> f64 {
        (p - self.origin).dot(self.dir) / self.dir.hypot2()
    }

    /// Do the two spans have parallel directions, within [`ACCURACY`]?
    #[inline]
    pub fn is_parallel(&self, other: &LineSpan) -> bool {
        self.dir.cross(other.dir).abs() < ACCURACY
    }

    /// Do the two spans lie on the same straight line?
    pub fn is_colinear(&self, other: &LineSpan) -> bool {
        self.is_parallel(other) && self.support_contains(other.origin)
    }

    /// Does `p` lie on this span, within [`ACCURACY`]?
    ///
    /// Both the perpendicular distance to the supporting line and the
    /// parameter bounds are tested with tolerance.
    pub fn contains(&self, p: Point) -> bool {
        if !self.support_contains(p) {
            return false;
        }
        let t = self.position_on_line(p);
        t > self.t0 - ACCURACY && t < self.t1 + ACCURACY
    }

    /// Perpendicular distance test against the supporting line.
    fn support_contains(&self, p: Point) -> bool {
        (p - self.origin).cross(self.dir).abs() / self.dir.hypot() < ACCURACY
    }

    /// Evaluate on the supporting line without clamping to the span.
    fn eval_unclamped(&self, t: f64) -> Point {
        // `0.0 * inf` is NaN; a coordinate the span does not vary in must
        // stay finite even at an infinite parameter.
        let x = if self.dir.x == 0.0 {
            self.origin.x
        } else {
            self.origin.x + t * self.dir.x
        };
        let y = if self.dir.y == 0.0 {
            self.origin.y
        } else {
            self.origin.y + t * self.dir.y
        };
        Point::new(x, y)
    }
}

impl ParamCurve for LineSpan {
    #[inline]
    fn domain(&self) -> Range<f64> {
        self.t0..self.t1
    }

    fn eval(&self, t: f64) -> Point {
        self.eval_unclamped(t.max(self.t0).min(self.t1))
    }

    /// A range that is reversed, or disjoint from the domain, collapses
    /// to a zero-length span.
    fn subcurve(&self, range: Range<f64>) -> LineSpan {
        let t0 = range.start.max(self.t0).min(self.t1);
        LineSpan {
            origin: self.origin,
            dir: self.dir,
            t0,
            t1: range.end.min(self.t1).max(t0),
        }
    }

    /// The span with the same trace and the opposite parametrization.
    fn reversed(&self) -> LineSpan {
        LineSpan {
            origin: self.origin,
            dir: -self.dir,
            t0: -self.t1,
            t1: -self.t0,
        }
    }

    fn nearest(&self, p: Point) -> Nearest {
        // `max`/`min` drop a NaN projection (zero-length direction),
        // degenerating to the start of the span.
        let t = self.position_on_line(p).max(self.t0).min(self.t1);
        let distance_sq = (p - self.eval_unclamped(t)).hypot2();
        Nearest { distance_sq, t }
    }

    fn line_intersections(&self, line: &LineSpan) -> SmallVec<[Point; 2]> {
        let mut out = SmallVec::new();
        let denom = self.dir.cross(line.dir);
        if denom.abs() < ACCURACY {
            // parallel or colinear: no transversal crossing
            return out;
        }
        let t = (line.origin - self.origin).cross(line.dir) / denom;
        let p = self.eval_unclamped(t);
        if self.contains(p) && line.contains(p) {
            out.push(p);
        }
        out
    }

    fn singular_points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(2);
        if self.t0.is_finite() {
            points.push(self.start());
        }
        if self.t1.is_finite() {
            points.push(self.end());
        }
        points
    }

    fn is_singular(&self, pos: f64) -> bool {
        near(pos, self.t0) || near(pos, self.t1)
    }

    fn approx_eq(&self, other: &LineSpan) -> bool {
        self.origin.approx_eq(other.origin)
            && near(self.dir.x, other.dir.x)
            && near(self.dir.y, other.dir.y)
            && near(self.t0, other.t0)
            && near(self.t1, other.t1)
    }

    fn bounding_box(&self) -> ClipBox {
        ClipBox::from_points(self.start(), self.end())
    }
}

impl ContinuousCurve for LineSpan {
    #[inline(always)]
    fn is_closed(&self) -> bool {
        false
    }

    fn append_to<S: PathSink>(&self, sink: &mut S) -> Result<(), UnboundedCurveError> {
        if !self.is_bounded() {
            return Err(UnboundedCurveError);
        }
        sink.line_to(self.end());
        Ok(())
    }
}

impl Mul<LineSpan> for Affine {
    type Output = LineSpan;

    /// The transformed span, with the parametrization preserved: the
    /// point at parameter `t` maps to the transformed point at `t`.
    #[inline]
    fn mul(self, other: LineSpan) -> LineSpan {
        LineSpan {
            origin: self * other.origin,
            dir: self.apply_linear(other.dir),
            t0: other.t0,
            t1: other.t1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn eval_clamps_to_domain() {
        let seg = LineSpan::segment(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        assert_near(seg.eval(0.5), Point::new(1.0, 1.0));
        assert_near(seg.eval(-3.0), Point::new(0.0, 0.0));
        assert_near(seg.eval(7.0), Point::new(2.0, 2.0));
    }

    #[test]
    fn eval_at_infinity_keeps_fixed_axis_finite() {
        let ray = LineSpan::ray(Point::new(3.0, 5.0), Vec2::new(1.0, 0.0));
        let p = ray.eval(f64::INFINITY);
        assert_eq!(p.x, f64::INFINITY);
        assert_eq!(p.y, 5.0);
        let line = LineSpan::line(Point::new(3.0, 5.0), Vec2::new(0.0, -2.0));
        let p = line.eval(f64::NEG_INFINITY);
        assert_eq!(p.x, 3.0);
        assert_eq!(p.y, f64::INFINITY);
    }

    #[test]
    fn nearest_and_position() {
        let seg = LineSpan::segment(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let n = seg.nearest(Point::new(1.0, 3.0));
        assert_eq!(n.t, 0.25);
        assert_eq!(n.distance_sq, 9.0);
        // beyond the end clamps to the endpoint
        let n = seg.nearest(Point::new(9.0, 0.0));
        assert_eq!(n.t, 1.0);
        assert_eq!(seg.position_of(Point::new(3.0, 0.0)), Some(0.75));
        assert_eq!(seg.position_of(Point::new(3.0, 0.5)), None);
        // position_on_line does not clamp
        assert_eq!(seg.position_on_line(Point::new(9.0, 2.0)), 2.25);
    }

    #[test]
    fn intersections_respect_both_extents() {
        let seg = LineSpan::segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let vertical = LineSpan::line(Point::new(0.5, -9.0), Vec2::new(0.0, 1.0));
        let hits = seg.line_intersections(&vertical);
        assert_eq!(hits.len(), 1);
        assert_near(hits[0], Point::new(0.5, 0.0));

        // crossing beyond the segment's extent
        let far = LineSpan::line(Point::new(5.0, 0.0), Vec2::new(0.0, 1.0));
        assert!(seg.line_intersections(&far).is_empty());

        // parallel lines never intersect
        let parallel = LineSpan::line(Point::new(0.0, 1.0), Vec2::new(1.0, 0.0));
        assert!(seg.line_intersections(&parallel).is_empty());

        // a ray only reports hits on its own side
        let ray = LineSpan::ray(Point::new(0.0, -1.0), Vec2::new(0.0, 1.0));
        assert_eq!(seg.line_intersections(&ray).len(), 1);
        let away = LineSpan::ray(Point::new(0.0, -1.0), Vec2::new(0.0, -1.0));
        assert!(seg.line_intersections(&away).is_empty());
    }

    #[test]
    fn endpoint_intersections_count() {
        let seg = LineSpan::segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let through_end = LineSpan::line(Point::new(1.0, -5.0), Vec2::new(0.0, 1.0));
        let hits = seg.line_intersections(&through_end);
        assert_eq!(hits.len(), 1);
        assert_near(hits[0], Point::new(1.0, 0.0));
    }

    #[test]
    fn reversed_keeps_trace() {
        let span = LineSpan::new(Point::new(1.0, 1.0), Vec2::new(2.0, 0.0), -1.0..3.0);
        let rev = span.reversed();
        assert_near(rev.start(), span.end());
        assert_near(rev.end(), span.start());
        assert_near(rev.eval(-1.5), span.eval(1.5));
        assert!(span.reversed().reversed().approx_eq(&span));
        // reversing a ray gives an inverted ray
        let ray = LineSpan::ray(Point::ZERO, Vec2::new(1.0, 0.0)).reversed();
        assert_eq!(ray.t0, f64::NEG_INFINITY);
        assert_eq!(ray.t1, 0.0);
    }

    #[test]
    fn subcurve_intersects_domain() {
        let line = LineSpan::line(Point::ZERO, Vec2::new(1.0, 0.0));
        let sub = line.subcurve(-2.0..5.0);
        assert_eq!(sub.t0, -2.0);
        assert_eq!(sub.t1, 5.0);
        let seg = LineSpan::segment(Point::ZERO, Point::new(1.0, 0.0));
        let sub = seg.subcurve(-2.0..0.5);
        assert_eq!(sub.t0, 0.0);
        assert_eq!(sub.t1, 0.5);
    }

    #[test]
    fn subcurve_reversed_range_collapses() {
        let seg = LineSpan::segment(Point::ZERO, Point::new(4.0, 0.0));
        let sub = seg.subcurve(0.75..0.25);
        assert_eq!((sub.t0, sub.t1), (0.75, 0.75));
        assert_eq!(sub.length(), 0.0);
        // a range entirely outside the domain collapses too
        let sub = seg.subcurve(3.0..5.0);
        assert_eq!((sub.t0, sub.t1), (1.0, 1.0));
    }

    #[test]
    fn singular_points_are_finite_endpoints() {
        let seg = LineSpan::segment(Point::ZERO, Point::new(1.0, 0.0));
        assert_eq!(seg.singular_points().len(), 2);
        assert!(seg.is_singular(0.0));
        assert!(seg.is_singular(1.0));
        assert!(!seg.is_singular(0.5));
        let ray = LineSpan::ray(Point::ZERO, Vec2::new(1.0, 0.0));
        assert_eq!(ray.singular_points(), vec![Point::ZERO]);
    }

    #[test]
    fn colinearity() {
        let a = LineSpan::segment(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let b = LineSpan::segment(Point::new(3.0, 3.0), Point::new(4.0, 4.0));
        let c = LineSpan::segment(Point::new(0.0, 1.0), Point::new(2.0, 3.0));
        assert!(a.is_colinear(&b));
        assert!(a.is_parallel(&c));
        assert!(!a.is_colinear(&c));
    }

    #[test]
    fn length_and_bounds() {
        let seg = LineSpan::segment(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_eq!(seg.length(), 5.0);
        assert!(seg.is_bounded());
        let ray = LineSpan::ray(Point::ZERO, Vec2::new(1.0, 0.0));
        assert_eq!(ray.length(), f64::INFINITY);
        assert!(!ray.is_bounded());
        let bb = ray.bounding_box();
        assert_eq!(bb.x0(), 0.0);
        assert_eq!(bb.x1(), f64::INFINITY);
        assert_eq!(bb.y0(), 0.0);
        assert_eq!(bb.y1(), 0.0);
    }

    #[test]
    fn transformed_span_commutes_with_eval() {
        let span = LineSpan::new(Point::new(1.0, 0.0), Vec2::new(1.0, 2.0), 0.5..2.0);
        let a = Affine::rotate(0.4).then_translate(Vec2::new(3.0, -1.0));
        let mapped = a * span;
        for t in [0.5, 1.0, 1.7, 2.0] {
            assert_near(mapped.eval(t), a * span.eval(t));
        }
    }
}
