// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sum type over the concrete curve kinds.

use core::ops::{Mul, Range};

use smallvec::SmallVec;

use crate::{
    Affine, ClipBox, ContinuousCurve, LineSpan, Nearest, ParamCurve, PathSink, Point, PolyCurve,
    Polyline, UnboundedCurveError,
};

/// Any of the concrete continuous curve kinds, as one type.
///
/// This is the element type for heterogeneous collections: a
/// [`PolyCurve<CurveSeg>`] can chain a segment into a polyline into a
/// nested chain. Because the type is closed, every operation is total;
/// there is no "unknown curve kind" case to report.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveSeg {
    /// A linear span: segment, ray or line.
    LineSpan(LineSpan),
    /// A piecewise-linear curve.
    Polyline(Polyline),
    /// A chain of further segments.
    PolyCurve(PolyCurve<CurveSeg>),
}

/// Apply an expression to the payload of whichever variant is present.
macro_rules! for_seg {
    ($self:expr, $c:ident => $e:expr) => {
        match $self {
            CurveSeg::LineSpan($c) => $e,
            CurveSeg::Polyline($c) => $e,
            CurveSeg::PolyCurve($c) => $e,
        }
    };
}

impl From<LineSpan> for CurveSeg {
    #[inline]
    fn from(span: LineSpan) -> CurveSeg {
        CurveSeg::LineSpan(span)
    }
}

impl From<Polyline> for CurveSeg {
    #[inline]
    fn from(poly: Polyline) -> CurveSeg {
        CurveSeg::Polyline(poly)
    }
}

impl From<PolyCurve<CurveSeg>> for CurveSeg {
    #[inline]
    fn from(chain: PolyCurve<CurveSeg>) -> CurveSeg {
        CurveSeg::PolyCurve(chain)
    }
}

impl ParamCurve for CurveSeg {
    #[inline]
    fn domain(&self) -> Range<f64> {
        for_seg!(self, c => c.domain())
    }

    #[inline]
    fn eval(&self, t: f64) -> Point {
        for_seg!(self, c => c.eval(t))
    }

    fn subcurve(&self, range: Range<f64>) -> CurveSeg {
        for_seg!(self, c => c.subcurve(range).into())
    }

    fn reversed(&self) -> CurveSeg {
        for_seg!(self, c => c.reversed().into())
    }

    #[inline]
    fn nearest(&self, p: Point) -> Nearest {
        for_seg!(self, c => c.nearest(p))
    }

    #[inline]
    fn line_intersections(&self, line: &LineSpan) -> SmallVec<[Point; 2]> {
        for_seg!(self, c => c.line_intersections(line))
    }

    #[inline]
    fn singular_points(&self) -> Vec<Point> {
        for_seg!(self, c => c.singular_points())
    }

    #[inline]
    fn is_singular(&self, pos: f64) -> bool {
        for_seg!(self, c => c.is_singular(pos))
    }

    /// Segments of different kinds are never approximately equal, even
    /// when their traces coincide.
    fn approx_eq(&self, other: &CurveSeg) -> bool {
        match (self, other) {
            (CurveSeg::LineSpan(a), CurveSeg::LineSpan(b)) => a.approx_eq(b),
            (CurveSeg::Polyline(a), CurveSeg::Polyline(b)) => a.approx_eq(b),
            (CurveSeg::PolyCurve(a), CurveSeg::PolyCurve(b)) => a.approx_eq(b),
            _ => false,
        }
    }

    #[inline]
    fn is_bounded(&self) -> bool {
        for_seg!(self, c => c.is_bounded())
    }

    #[inline]
    fn bounding_box(&self) -> ClipBox {
        for_seg!(self, c => c.bounding_box())
    }
}

impl ContinuousCurve for CurveSeg {
    #[inline]
    fn is_closed(&self) -> bool {
        for_seg!(self, c => c.is_closed())
    }

    fn append_to<S: PathSink>(&self, sink: &mut S) -> Result<(), UnboundedCurveError> {
        for_seg!(self, c => c.append_to(sink))
    }
}

impl Mul<CurveSeg> for Affine {
    type Output = CurveSeg;

    fn mul(self, other: CurveSeg) -> CurveSeg {
        for_seg!(other, c => (self * c).into())
    }
}
