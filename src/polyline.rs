// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open and closed polylines.

use core::ops::{Mul, Range};

use smallvec::SmallVec;

use crate::{
    ACCURACY, Affine, ClipBox, ContinuousCurve, LineSpan, Nearest, ParamCurve, PathSink, Point,
    UnboundedCurveError, point::near,
};

/// A piecewise-linear curve through a sequence of vertices.
///
/// Each edge occupies one unit of parameter: position `i` is vertex `i`,
/// and fractional positions interpolate along the edge. An open polyline
/// with `n` vertices has domain `[0, n - 1]`; a closed one has domain
/// `[0, n]`, with the final unit covering the seam edge back to the first
/// vertex.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

impl Polyline {
    /// Create a polyline from its vertices.
    ///
    /// A closed polyline joins its last vertex back to its first; the
    /// seam edge is implicit and the first vertex is not repeated.
    #[inline]
    pub fn new(points: Vec<Point>, closed: bool) -> Polyline {
        Polyline { points, closed }
    }

    /// The vertices of the polyline.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does the polyline have no vertices?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Does the polyline join back to its first vertex?
    #[inline]
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Append a vertex.
    #[inline]
    pub fn push(&mut self, p: impl Into<Point>) {
        self.points.push(p.into());
    }

    /// The number of edges: one less than the vertex count when open,
    /// equal to it when closed.
    #[inline]
    pub fn edge_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// The edges, in order, as line segments over `[0, 1]` each.
    ///
    /// A closed polyline ends with the seam edge from the last vertex
    /// back to the first.
    pub fn edges(&self) -> impl Iterator<Item = LineSpan> + '_ {
        let n = self.points.len();
        (0..self.edge_count())
            .map(move |i| LineSpan::segment(self.points[i], self.points[(i + 1) % n]))
    }

    /// Twice the signed area enclosed by the vertex loop, by the shoelace
    /// formula. Positive for counter-clockwise winding.
    ///
    /// Chiefly meaningful for closed polylines; for open ones it is the
    /// area of the polygon obtained by joining the endpoints.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let mut sum = 0.0;
        for i in 0..n {
            let p0 = self.points[i];
            let p1 = self.points[(i + 1) % n];
            sum += p0.x * p1.y - p1.x * p0.y;
        }
        sum / 2.0
    }

    // Appends `p` unless it repeats the previously appended vertex.
    fn push_dedup(points: &mut Vec<Point>, p: Point) {
        if points.last().map_or(true, |last| !last.approx_eq(p)) {
            points.push(p);
        }
    }
}

impl ParamCurve for Polyline {
    #[inline]
    fn domain(&self) -> Range<f64> {
        0.0..self.edge_count() as f64
    }

    fn eval(&self, t: f64) -> Point {
        let n = self.points.len();
        if n == 0 {
            return Point::ZERO;
        }
        let t = t.max(0.0).min(self.edge_count() as f64);
        let ind = (t + ACCURACY).floor() as usize;
        let p0 = self.points[ind % n];
        let frac = t - ind as f64;
        if frac.abs() < ACCURACY {
            p0
        } else {
            p0.lerp(self.points[(ind + 1) % n], frac)
        }
    }

    fn subcurve(&self, range: Range<f64>) -> Polyline {
        let n = self.points.len();
        if n < 2 {
            return Polyline::new(Vec::new(), false);
        }
        let n_edges = self.edge_count() as f64;
        let t0 = range.start.max(0.0).min(n_edges);
        let t1 = range.end.max(0.0).min(n_edges);
        if t1 < t0 && !self.closed {
            return Polyline::new(Vec::new(), false);
        }
        let ind0 = (t0 + ACCURACY).floor() as usize;
        let ind1 = (t1 + ACCURACY).floor() as usize;
        let mut points = vec![self.eval(t0)];
        if t1 < t0 {
            // closed: wrap through the seam, then from the start
            for i in ind0 + 1..n {
                Self::push_dedup(&mut points, self.points[i]);
            }
            for i in 0..=ind1.min(n - 1) {
                Self::push_dedup(&mut points, self.points[i]);
            }
        } else {
            for i in ind0 + 1..=ind1 {
                Self::push_dedup(&mut points, self.points[i % n]);
            }
        }
        Self::push_dedup(&mut points, self.eval(t1));
        Polyline::new(points, false)
    }

    fn reversed(&self) -> Polyline {
        let points = if self.closed {
            // keep the start vertex in place so position 0 is preserved
            let mut points = Vec::with_capacity(self.points.len());
            points.extend(self.points.first());
            points.extend(self.points[1..].iter().rev());
            points
        } else {
            self.points.iter().rev().copied().collect()
        };
        Polyline::new(points, self.closed)
    }

    fn nearest(&self, p: Point) -> Nearest {
        let mut best = Nearest {
            distance_sq: f64::INFINITY,
            t: 0.0,
        };
        if self.points.len() == 1 {
            best.distance_sq = (p - self.points[0]).hypot2();
            return best;
        }
        for (i, edge) in self.edges().enumerate() {
            let n = edge.nearest(p);
            if n.distance_sq < best.distance_sq {
                best = Nearest {
                    distance_sq: n.distance_sq,
                    t: i as f64 + n.t,
                };
            }
        }
        best
    }

    fn line_intersections(&self, line: &LineSpan) -> SmallVec<[Point; 2]> {
        let mut out: SmallVec<[Point; 2]> = SmallVec::new();
        for edge in self.edges() {
            for p in edge.line_intersections(line) {
                // a hit at a shared vertex is reported by both edges
                if !out.iter().any(|q| q.approx_eq(p)) {
                    out.push(p);
                }
            }
        }
        out
    }

    fn singular_points(&self) -> Vec<Point> {
        self.points.clone()
    }

    /// Vertices are the corners, so any position within tolerance of an
    /// integer is singular.
    fn is_singular(&self, pos: f64) -> bool {
        near(pos, pos.round()) && pos > -ACCURACY && pos < self.edge_count() as f64 + ACCURACY
    }

    fn approx_eq(&self, other: &Polyline) -> bool {
        self.closed == other.closed
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(p, q)| p.approx_eq(*q))
    }

    fn bounding_box(&self) -> ClipBox {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return ClipBox::ZERO;
        };
        let mut bb = ClipBox::from_points(*first, *first);
        for p in iter {
            bb = bb.union(&ClipBox::from_points(*p, *p));
        }
        bb
    }
}

impl ContinuousCurve for Polyline {
    #[inline]
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn append_to<S: PathSink>(&self, sink: &mut S) -> Result<(), UnboundedCurveError> {
        for p in self.points.iter().skip(1) {
            sink.line_to(*p);
        }
        Ok(())
    }
}

impl Mul<Polyline> for Affine {
    type Output = Polyline;

    fn mul(self, other: Polyline) -> Polyline {
        Polyline {
            points: other.points.iter().map(|&p| self * p).collect(),
            closed: other.closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    fn zigzag() -> Polyline {
        Polyline::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 1.0),
                Point::new(4.0, 1.0),
            ],
            false,
        )
    }

    fn square() -> Polyline {
        Polyline::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(0.0, 2.0),
            ],
            true,
        )
    }

    #[test]
    fn domains() {
        assert_eq!(zigzag().domain(), 0.0..3.0);
        assert_eq!(square().domain(), 0.0..4.0);
        assert_eq!(Polyline::default().domain(), 0.0..0.0);
        let single = Polyline::new(vec![Point::ZERO], false);
        assert_eq!(single.domain(), 0.0..0.0);
    }

    #[test]
    fn eval_interpolates_edges() {
        let poly = zigzag();
        assert_near(poly.eval(0.0), Point::new(0.0, 0.0));
        assert_near(poly.eval(0.5), Point::new(1.0, 0.0));
        assert_near(poly.eval(1.0), Point::new(2.0, 0.0));
        assert_near(poly.eval(2.25), Point::new(2.5, 1.0));
        assert_near(poly.eval(3.0), Point::new(4.0, 1.0));
        // clamped outside the domain
        assert_near(poly.eval(-1.0), Point::new(0.0, 0.0));
        assert_near(poly.eval(10.0), Point::new(4.0, 1.0));
    }

    #[test]
    fn eval_closed_seam() {
        let sq = square();
        assert_near(sq.eval(3.5), Point::new(0.0, 1.0));
        assert_near(sq.eval(4.0), sq.eval(0.0));
        assert!(sq.is_closed());
    }

    #[test]
    fn eval_empty_is_origin() {
        assert_eq!(Polyline::default().eval(0.5), Point::ZERO);
    }

    #[test]
    fn nearest_picks_correct_edge() {
        let poly = zigzag();
        let n = poly.nearest(Point::new(1.0, -1.0));
        assert_eq!(n.t, 0.5);
        assert_eq!(n.distance_sq, 1.0);
        let n = poly.nearest(Point::new(3.0, 2.0));
        assert_eq!(n.t, 2.5);
        assert_eq!(n.distance_sq, 1.0);
        assert_eq!(poly.position_of(Point::new(2.0, 0.5)), Some(1.5));
        assert_eq!(poly.position_of(Point::new(9.0, 9.0)), None);
    }

    #[test]
    fn nearest_empty_is_infinite() {
        let n = Polyline::default().nearest(Point::new(1.0, 1.0));
        assert_eq!(n.distance_sq, f64::INFINITY);
        assert_eq!(n.t, 0.0);
    }

    #[test]
    fn intersections_dedup_shared_vertex() {
        let poly = zigzag();
        // passes through the vertex (2, 0) shared by the first two edges
        let line = LineSpan::line(Point::new(2.0, -5.0), Vec2::new(0.0, 1.0));
        let hits = poly.line_intersections(&line);
        assert_eq!(hits.len(), 2);
        assert_near(hits[0], Point::new(2.0, 0.0));
        assert_near(hits[1], Point::new(2.0, 1.0));
    }

    #[test]
    fn subcurve_open() {
        let poly = zigzag();
        let sub = poly.subcurve(0.5..2.5);
        assert!(!sub.closed());
        assert_eq!(sub.vertices().len(), 4);
        assert_near(sub.vertices()[0], Point::new(1.0, 0.0));
        assert_near(sub.vertices()[1], Point::new(2.0, 0.0));
        assert_near(sub.vertices()[2], Point::new(2.0, 1.0));
        assert_near(sub.vertices()[3], Point::new(3.0, 1.0));
        // a reversed range on an open polyline is empty
        assert!(poly.subcurve(2.0..1.0).is_empty());
        // same-edge extraction
        let sub = poly.subcurve(0.25..0.75);
        assert_eq!(sub.vertices().len(), 2);
        assert_near(sub.vertices()[0], Point::new(0.5, 0.0));
        assert_near(sub.vertices()[1], Point::new(1.5, 0.0));
    }

    #[test]
    fn subcurve_closed_wraps() {
        let sq = square();
        let sub = sq.subcurve(3.5..0.5);
        assert!(!sub.closed());
        assert_eq!(sub.vertices().len(), 3);
        assert_near(sub.vertices()[0], Point::new(0.0, 1.0));
        assert_near(sub.vertices()[1], Point::new(0.0, 0.0));
        assert_near(sub.vertices()[2], Point::new(1.0, 0.0));
    }

    #[test]
    fn subcurve_vertex_aligned_has_no_duplicates() {
        let sq = square();
        let sub = sq.subcurve(1.0..3.0);
        assert_eq!(sub.vertices().len(), 3);
        assert_near(sub.vertices()[0], Point::new(2.0, 0.0));
        assert_near(sub.vertices()[1], Point::new(2.0, 2.0));
        assert_near(sub.vertices()[2], Point::new(0.0, 2.0));
    }

    #[test]
    fn reversed() {
        let poly = zigzag();
        let rev = poly.reversed();
        assert_near(rev.start(), poly.end());
        assert_near(rev.end(), poly.start());
        assert_near(rev.eval(0.5), poly.eval(2.5));
        assert!(rev.reversed().approx_eq(&poly));
        // a closed polyline keeps its start vertex in place
        let sq = square();
        let rev = sq.reversed();
        assert!(rev.closed());
        assert_near(rev.start(), sq.start());
        assert_near(rev.eval(1.0), Point::new(0.0, 2.0));
        assert!(rev.reversed().approx_eq(&sq));
    }

    #[test]
    fn edges_of_closed_include_seam() {
        let sq = square();
        let edges: Vec<_> = sq.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_near(edges[3].start(), Point::new(0.0, 2.0));
        assert_near(edges[3].end(), Point::new(0.0, 0.0));
        assert_eq!(zigzag().edges().count(), 3);
    }

    #[test]
    fn signed_area() {
        assert_eq!(square().signed_area(), 4.0);
        assert_eq!(square().reversed().signed_area(), -4.0);
    }

    #[test]
    fn singular_positions_are_vertices() {
        let poly = zigzag();
        assert!(poly.is_singular(0.0));
        assert!(poly.is_singular(2.0));
        assert!(poly.is_singular(1.0 + 1e-13));
        assert!(!poly.is_singular(1.5));
        assert_eq!(poly.singular_points().len(), 4);
    }

    #[test]
    fn bounding_box() {
        let bb = zigzag().bounding_box();
        assert_eq!((bb.x0(), bb.y0(), bb.x1(), bb.y1()), (0.0, 0.0, 4.0, 1.0));
        assert_eq!(Polyline::default().bounding_box(), ClipBox::ZERO);
    }

    #[test]
    fn affine_maps_vertices() {
        let poly = zigzag();
        let mapped = Affine::translate(Vec2::new(1.0, 2.0)) * poly.clone();
        assert_near(mapped.eval(1.5), poly.eval(1.5) + Vec2::new(1.0, 2.0));
        assert!(mapped.closed() == poly.closed());
    }
}
