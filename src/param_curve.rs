// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for parametrized curves.

use core::fmt;
use core::ops::Range;

use smallvec::SmallVec;

use crate::{ClipBox, CurveSet, LineSpan, Point, Polyline, clip::clip_continuous};

/// The fixed tolerance used throughout the crate.
///
/// Two real values whose difference is below this threshold are treated as
/// equal; a point is considered to lie on a curve when its distance to the
/// curve is below it. There is exactly one definition site, so every
/// tolerance decision in the crate is made against the same constant.
pub const ACCURACY: f64 = 1e-12;

/// The nearest position on a curve to some point.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nearest {
    /// The square of the distance from the nearest position on the curve
    /// to the given point.
    pub distance_sq: f64,
    /// The position on the curve of the nearest point.
    ///
    /// This position is within the curve's parameter domain.
    pub t: f64,
}

/// The error returned when an operation needs a concrete endpoint or a
/// finite sampling of a curve whose domain is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnboundedCurveError;

impl fmt::Display for UnboundedCurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "curve has an unbounded parameter domain")
    }
}

impl std::error::Error for UnboundedCurveError {}

/// A sink for the traversal of a continuous curve, as a sequence of path
/// commands.
///
/// This is the seam towards rendering: a painting collaborator implements
/// it and receives the curve in traversal order. Nothing in this crate
/// interprets the commands.
pub trait PathSink {
    /// Start a new subpath at `p`.
    fn move_to(&mut self, p: Point);
    /// Add a line from the current position to `p`.
    fn line_to(&mut self, p: Point);
    /// Close the current subpath, joining back to its start.
    fn close_path(&mut self);
}

/// A curve parametrized by a scalar.
///
/// The parameter domain is an interval `[t0, t1]` with `t0 <= t1`; either
/// bound may be infinite. Evaluating outside the domain clamps to the
/// nearer bound, so out-of-domain parameters are never an error.
pub trait ParamCurve: Sized + Clone {
    /// The parameter domain of the curve.
    ///
    /// The start is always less than or equal to the end; either may be
    /// infinite.
    fn domain(&self) -> Range<f64>;

    /// Evaluate the curve at parameter `t`, clamped into the domain.
    ///
    /// Evaluating an unbounded curve at an infinite parameter yields a
    /// point with one or both coordinates infinite; coordinates that do
    /// not vary along the curve stay finite.
    fn eval(&self, t: f64) -> Point;

    /// The curve restricted to the parameter range `range`, intersected
    /// with the curve's own domain.
    ///
    /// If the range is reversed (`start > end`) the result is empty,
    /// except for closed curves, which wrap around their seam.
    fn subcurve(&self, range: Range<f64>) -> Self;

    /// The same curve with the opposite parametrization.
    fn reversed(&self) -> Self;

    /// Find the position on the curve that is nearest to `p`.
    ///
    /// Unlike [`position_of`], this is always defined; it is the robust
    /// way to recover a parameter for a point known to lie on the curve
    /// up to roundoff.
    ///
    /// [`position_of`]: ParamCurve::position_of
    fn nearest(&self, p: Point) -> Nearest;

    /// Intersection points of this curve with a linear span.
    fn line_intersections(&self, line: &LineSpan) -> SmallVec<[Point; 2]>;

    /// The points where the curve is not differentiable, such as the
    /// endpoints of a span or the vertices of a polyline.
    fn singular_points(&self) -> Vec<Point>;

    /// Is the curve non-differentiable at position `pos`?
    fn is_singular(&self, pos: f64) -> bool;

    /// Equality up to the fixed [`ACCURACY`] tolerance, compared
    /// coefficient-wise on the defining data.
    fn approx_eq(&self, other: &Self) -> bool;

    /// The smallest axis-aligned box containing the curve.
    ///
    /// Unbounded curves yield boxes with infinite bounds.
    fn bounding_box(&self) -> ClipBox;

    /// The first point of the curve.
    #[inline]
    fn start(&self) -> Point {
        self.eval(self.domain().start)
    }

    /// The last point of the curve.
    #[inline]
    fn end(&self) -> Point {
        self.eval(self.domain().end)
    }

    /// Is the curve's extent finite?
    ///
    /// The default checks the parameter domain, which is right for curves
    /// whose parameter range and geometric extent coincide; composites
    /// override it to ask their children.
    #[inline]
    fn is_bounded(&self) -> bool {
        let d = self.domain();
        d.start.is_finite() && d.end.is_finite()
    }

    /// The position of `p` on the curve, or `None` if `p` does not lie on
    /// the curve within [`ACCURACY`].
    fn position_of(&self, p: Point) -> Option<f64> {
        let nearest = self.nearest(p);
        (nearest.distance_sq.sqrt() < ACCURACY).then_some(nearest.t)
    }

    /// The distance from `p` to the curve.
    #[inline]
    fn distance(&self, p: Point) -> f64 {
        self.nearest(p).distance_sq.sqrt()
    }
}

/// A curve that can be drawn without lifting the pen.
pub trait ContinuousCurve: ParamCurve {
    /// Does the curve loop back onto its own start?
    ///
    /// For a closed curve, evaluating at the domain start and at the
    /// domain end yields the same point.
    fn is_closed(&self) -> bool;

    /// Append this curve to `sink`, assuming the pen is already at the
    /// curve's first point.
    ///
    /// # Errors
    ///
    /// Returns [`UnboundedCurveError`] if the curve has no finite
    /// endpoints to traverse.
    fn append_to<S: PathSink>(&self, sink: &mut S) -> Result<(), UnboundedCurveError>;

    /// Emit the whole curve to `sink` as one subpath, closing it if the
    /// curve is closed.
    ///
    /// # Errors
    ///
    /// Returns [`UnboundedCurveError`] if the curve is unbounded.
    fn to_path<S: PathSink>(&self, sink: &mut S) -> Result<(), UnboundedCurveError> {
        if !self.is_bounded() {
            return Err(UnboundedCurveError);
        }
        sink.move_to(self.start());
        self.append_to(sink)?;
        if self.is_closed() {
            sink.close_path();
        }
        Ok(())
    }

    /// Approximate the curve by a polyline with `n` uniform parameter
    /// steps (`n + 1` vertices).
    ///
    /// # Errors
    ///
    /// Returns [`UnboundedCurveError`] if the curve is unbounded.
    fn as_polyline(&self, n: usize) -> Result<Polyline, UnboundedCurveError> {
        if !self.is_bounded() {
            return Err(UnboundedCurveError);
        }
        let d = self.domain();
        let mut points = Vec::with_capacity(n + 1);
        if n == 0 {
            points.push(self.start());
        } else {
            let dt = (d.end - d.start) / n as f64;
            for i in 0..=n {
                points.push(self.eval(d.start + dt * i as f64));
            }
        }
        Ok(Polyline::new(points, false))
    }

    /// Clip this curve by an axis-aligned box, returning the portions
    /// lying inside it.
    ///
    /// See [`clip_continuous`] for the full contract.
    #[inline]
    fn clip(&self, bounds: &ClipBox) -> CurveSet<Self> {
        clip_continuous(self, bounds)
    }
}
