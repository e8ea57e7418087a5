// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous chains of curves.

use core::ops::{Mul, Range};

use smallvec::SmallVec;

use crate::{
    Affine, ClipBox, ContinuousCurve, CurveSet, LineSpan, Nearest, ParamCurve, PathSink, Point,
    UnboundedCurveError,
};

/// A chain of continuous curves traversed end to end, optionally closed
/// into a loop.
///
/// Parametrization is inherited from [`CurveSet`]: child `k` occupies
/// `[2k, 2k + 1]`. Unlike a plain set, a `PolyCurve` is itself a
/// [`ContinuousCurve`], and when closed its subcurve extraction wraps
/// around the seam between the last child and the first.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolyCurve<C> {
    curves: CurveSet<C>,
    closed: bool,
}

impl<C: ContinuousCurve> PolyCurve<C> {
    /// Create a chain from its pieces, in traversal order.
    ///
    /// The pieces are expected to be contiguous: each one starting where
    /// the previous ends, and, when `closed`, the last ending at the
    /// first one's start. This is not checked.
    pub fn new(curves: impl IntoIterator<Item = C>, closed: bool) -> PolyCurve<C> {
        PolyCurve {
            curves: CurveSet::from_curves(curves),
            closed,
        }
    }

    /// The underlying set of pieces.
    #[inline]
    pub fn curves(&self) -> &CurveSet<C> {
        &self.curves
    }

    /// The number of pieces.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Does the chain contain no pieces?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Does the chain loop back onto its start?
    #[inline]
    pub fn closed(&self) -> bool {
        self.closed
    }
}

impl<C: ContinuousCurve> ParamCurve for PolyCurve<C> {
    #[inline]
    fn domain(&self) -> Range<f64> {
        self.curves.domain()
    }

    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.curves.eval(t)
    }

    /// Extraction on a closed chain wraps: a range with `start > end`
    /// runs through the seam. The result is always an open chain.
    fn subcurve(&self, range: Range<f64>) -> PolyCurve<C> {
        PolyCurve {
            curves: self.curves.subcurve_impl(range.start, range.end, self.closed),
            closed: false,
        }
    }

    fn reversed(&self) -> PolyCurve<C> {
        PolyCurve {
            curves: self.curves.reversed(),
            closed: self.closed,
        }
    }

    #[inline]
    fn nearest(&self, p: Point) -> Nearest {
        self.curves.nearest(p)
    }

    #[inline]
    fn line_intersections(&self, line: &LineSpan) -> SmallVec<[Point; 2]> {
        self.curves.line_intersections(line)
    }

    #[inline]
    fn singular_points(&self) -> Vec<Point> {
        self.curves.singular_points()
    }

    #[inline]
    fn is_singular(&self, pos: f64) -> bool {
        self.curves.is_singular(pos)
    }

    fn approx_eq(&self, other: &PolyCurve<C>) -> bool {
        self.closed == other.closed && self.curves.approx_eq(&other.curves)
    }

    #[inline]
    fn is_bounded(&self) -> bool {
        self.curves.is_bounded()
    }

    #[inline]
    fn bounding_box(&self) -> ClipBox {
        self.curves.bounding_box()
    }
}

impl<C: ContinuousCurve> ContinuousCurve for PolyCurve<C> {
    #[inline]
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn append_to<S: PathSink>(&self, sink: &mut S) -> Result<(), UnboundedCurveError> {
        let mut pen = self.start();
        for c in &self.curves {
            // bridge any discontinuity between pieces
            if !pen.approx_eq(c.start()) {
                sink.line_to(c.start());
            }
            c.append_to(sink)?;
            pen = c.end();
        }
        Ok(())
    }
}

impl<C> Mul<PolyCurve<C>> for Affine
where
    Affine: Mul<C, Output = C>,
{
    type Output = PolyCurve<C>;

    fn mul(self, other: PolyCurve<C>) -> PolyCurve<C> {
        PolyCurve {
            curves: <Affine as Mul<CurveSet<C>>>::mul(self, other.curves),
            closed: other.closed,
        }
    }
}
