// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A collection of curves addressed through one shared parameter.

use core::f64::consts::{FRAC_PI_2, PI};
use core::ops::{Mul, Range};

use smallvec::SmallVec;

use crate::{Affine, ClipBox, LineSpan, Nearest, ParamCurve, Point, point::near};

/// Map a position `t` in the domain `[t0, t1]` onto `[0, 1]`, preserving
/// order.
///
/// Finite domains map linearly; an infinite bound is folded in with the
/// arctangent, so that even a full line's domain compresses into the unit
/// segment. Positions outside the domain clamp to 0 or 1.
/// [`from_unit_segment`] is the inverse.
pub fn to_unit_segment(t: f64, t0: f64, t1: f64) -> f64 {
    if t <= t0 {
        return 0.0;
    }
    if t >= t1 {
        return 1.0;
    }
    if t0.is_infinite() && t1.is_infinite() {
        t.atan() / PI + 0.5
    } else if t0.is_infinite() {
        (t - t1).atan() / FRAC_PI_2 + 1.0
    } else if t1.is_infinite() {
        (t - t0).atan() / FRAC_PI_2
    } else {
        (t - t0) / (t1 - t0)
    }
}

/// Map a position `u` in `[0, 1]` back onto the domain `[t0, t1]`.
///
/// The inverse of [`to_unit_segment`]; values outside `[0, 1]` clamp to
/// the domain bounds.
pub fn from_unit_segment(u: f64, t0: f64, t1: f64) -> f64 {
    if u <= 0.0 {
        return t0;
    }
    if u >= 1.0 {
        return t1;
    }
    if t0.is_infinite() && t1.is_infinite() {
        ((u - 0.5) * PI).tan()
    } else if t0.is_infinite() {
        t1 + ((u - 1.0) * FRAC_PI_2).tan()
    } else if t1.is_infinite() {
        t0 + (u * FRAC_PI_2).tan()
    } else {
        t0 + u * (t1 - t0)
    }
}

/// An ordered set of curves, parametrized as one curve.
///
/// Child `k` occupies the global parameter interval `[2k, 2k + 1]`; its
/// own domain, finite or not, is compressed onto that unit through
/// [`to_unit_segment`]. The open gaps `(2k + 1, 2k + 2)` between children
/// do not correspond to any geometry: evaluating there snaps to the end
/// of the left child or the start of the right one, whichever is nearer.
///
/// A set with `n` children has domain `[0, 2n - 1]`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSet<C> {
    curves: Vec<C>,
}

impl<C> Default for CurveSet<C> {
    fn default() -> CurveSet<C> {
        CurveSet { curves: Vec::new() }
    }
}

impl<C: ParamCurve> CurveSet<C> {
    /// Create an empty set.
    #[inline]
    pub fn new() -> CurveSet<C> {
        CurveSet::default()
    }

    /// Create a set from a list of curves, dropping approximate
    /// duplicates.
    pub fn from_curves(curves: impl IntoIterator<Item = C>) -> CurveSet<C> {
        let mut set = CurveSet::new();
        for c in curves {
            set.push(c);
        }
        set
    }

    /// Build a set without the duplicate check, for results already known
    /// to be duplicate-free.
    pub(crate) fn from_raw(curves: Vec<C>) -> CurveSet<C> {
        CurveSet { curves }
    }

    /// Append a curve, unless an approximately equal one is already
    /// present. Returns whether the curve was added.
    pub fn push(&mut self, curve: C) -> bool {
        if self.curves.iter().any(|c| c.approx_eq(&curve)) {
            return false;
        }
        self.curves.push(curve);
        true
    }

    /// Remove and return the curve at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn remove(&mut self, index: usize) -> C {
        self.curves.remove(index)
    }

    /// Remove all curves.
    #[inline]
    pub fn clear(&mut self) {
        self.curves.clear();
    }

    /// The number of curves in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Does the set contain no curves?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// The curve at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.curves.get(index)
    }

    /// The first curve, if any.
    #[inline]
    pub fn first(&self) -> Option<&C> {
        self.curves.first()
    }

    /// The last curve, if any.
    #[inline]
    pub fn last(&self) -> Option<&C> {
        self.curves.last()
    }

    /// Iterate over the curves in order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, C> {
        self.curves.iter()
    }

    /// The curves as a slice.
    #[inline]
    pub fn curves(&self) -> &[C] {
        &self.curves
    }

    /// The index of the child curve owning the global position `t`.
    ///
    /// Positions in a gap resolve to the nearer neighbor; out-of-domain
    /// positions clamp to the first or last child.
    pub fn seg_index(&self, t: f64) -> usize {
        let n = self.curves.len();
        if n == 0 || t < 0.0 {
            return 0;
        }
        if t > 2.0 * n as f64 - 1.0 {
            return n - 1;
        }
        let nc = t.floor() as usize;
        if nc % 2 == 0 {
            nc / 2
        } else if t - (nc as f64) < 0.5 {
            nc / 2
        } else {
            (nc / 2 + 1).min(n - 1)
        }
    }

    /// Convert a global position into a position on the owning child's
    /// own domain.
    pub fn local_position(&self, t: f64) -> f64 {
        let i = self.seg_index(t);
        let d = self.curves[i].domain();
        let u = (t - 2.0 * i as f64).max(0.0).min(1.0);
        from_unit_segment(u, d.start, d.end)
    }

    /// Convert a position on child `index` into a global position on the
    /// set.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn global_position(&self, index: usize, t: f64) -> f64 {
        let d = self.curves[index].domain();
        2.0 * index as f64 + to_unit_segment(t, d.start, d.end)
    }

    /// Clip every child by `bounds` and collect the surviving fragments
    /// into one flat set.
    ///
    /// See [`clip_set`](crate::clip_set).
    #[inline]
    pub fn clip(&self, bounds: &ClipBox) -> CurveSet<C>
    where
        C: crate::ContinuousCurve,
    {
        crate::clip::clip_set(self, bounds)
    }

    /// Extract the portion between two global positions.
    ///
    /// When `closed` is set and `t1 < t0`, the extraction wraps past the
    /// last child and continues from the first; otherwise a reversed or
    /// empty range yields an empty set.
    pub(crate) fn subcurve_impl(&self, t0: f64, t1: f64, closed: bool) -> CurveSet<C> {
        let n = self.curves.len();
        if n == 0 {
            return CurveSet::new();
        }
        // Clamp a little below the domain end, so a position at or past
        // the end still resolves into the last child.
        let max = 2.0 * n as f64 - 0.6;
        let t0 = t0.max(0.0).min(max);
        let t1 = t1.max(0.0).min(max);
        let child_of = |t: f64| {
            let mut ind = (t / 2.0).floor() as usize;
            if t - 2.0 * ind as f64 > 1.5 {
                ind += 1;
            }
            ind.min(n - 1)
        };
        let ind0 = child_of(t0);
        let ind1 = child_of(t1);
        let local = |ind: usize, t: f64| {
            let d = self.curves[ind].domain();
            let u = (t - 2.0 * ind as f64).max(0.0).min(1.0);
            from_unit_segment(u, d.start, d.end)
        };
        if ind0 == ind1 && t0 < t1 {
            let piece = self.curves[ind0].subcurve(local(ind0, t0)..local(ind1, t1));
            return CurveSet::from_raw(vec![piece]);
        }
        if t1 <= t0 && !closed {
            return CurveSet::new();
        }
        let mut out = Vec::new();
        let first = &self.curves[ind0];
        out.push(first.subcurve(local(ind0, t0)..first.domain().end));
        if ind1 > ind0 {
            out.extend(self.curves[ind0 + 1..ind1].iter().cloned());
        } else {
            out.extend(self.curves[ind0 + 1..].iter().cloned());
            out.extend(self.curves[..ind1].iter().cloned());
        }
        let last = &self.curves[ind1];
        out.push(last.subcurve(last.domain().start..local(ind1, t1)));
        CurveSet::from_raw(out)
    }
}

impl<C: ParamCurve> ParamCurve for CurveSet<C> {
    fn domain(&self) -> Range<f64> {
        0.0..(2.0 * self.curves.len() as f64 - 1.0).max(0.0)
    }

    fn eval(&self, t: f64) -> Point {
        let n = self.curves.len();
        if n == 0 {
            return Point::ZERO;
        }
        let t = t.max(0.0).min(2.0 * n as f64 - 1.0);
        let nc = t.floor() as usize;
        if nc % 2 == 0 {
            let child = &self.curves[nc / 2];
            let d = child.domain();
            child.eval(from_unit_segment(t - nc as f64, d.start, d.end))
        } else if t - (nc as f64) < 0.5 {
            self.curves[nc / 2].end()
        } else {
            self.curves[(nc / 2 + 1).min(n - 1)].start()
        }
    }

    fn subcurve(&self, range: Range<f64>) -> CurveSet<C> {
        self.subcurve_impl(range.start, range.end, false)
    }

    fn reversed(&self) -> CurveSet<C> {
        CurveSet::from_raw(self.curves.iter().rev().map(ParamCurve::reversed).collect())
    }

    fn nearest(&self, p: Point) -> Nearest {
        let mut best = Nearest {
            distance_sq: f64::INFINITY,
            t: 0.0,
        };
        for (i, c) in self.curves.iter().enumerate() {
            let n = c.nearest(p);
            if n.distance_sq < best.distance_sq {
                best = Nearest {
                    distance_sq: n.distance_sq,
                    t: self.global_position(i, n.t),
                };
            }
        }
        best
    }

    fn line_intersections(&self, line: &LineSpan) -> SmallVec<[Point; 2]> {
        let mut out: SmallVec<[Point; 2]> = SmallVec::new();
        for c in &self.curves {
            for p in c.line_intersections(line) {
                // adjacent children can meet at a shared point
                if !out.iter().any(|q| q.approx_eq(p)) {
                    out.push(p);
                }
            }
        }
        out
    }

    fn singular_points(&self) -> Vec<Point> {
        let mut out = Vec::new();
        for c in &self.curves {
            for p in c.singular_points() {
                if !out.iter().any(|q: &Point| q.approx_eq(p)) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Junctions between children and gap positions are always singular;
    /// interior positions defer to the owning child.
    fn is_singular(&self, pos: f64) -> bool {
        if self.curves.is_empty() {
            return false;
        }
        if near(pos, pos.round()) {
            return true;
        }
        if pos.floor() as i64 % 2 != 0 {
            return true;
        }
        let i = self.seg_index(pos);
        self.curves[i].is_singular(self.local_position(pos))
    }

    fn approx_eq(&self, other: &CurveSet<C>) -> bool {
        self.curves.len() == other.curves.len()
            && self
                .curves
                .iter()
                .zip(&other.curves)
                .all(|(a, b)| a.approx_eq(b))
    }

    /// Bounded iff every child is; the compressed domain says nothing
    /// about geometric extent.
    fn is_bounded(&self) -> bool {
        self.curves.iter().all(ParamCurve::is_bounded)
    }

    fn bounding_box(&self) -> ClipBox {
        let mut iter = self.curves.iter();
        let Some(first) = iter.next() else {
            return ClipBox::ZERO;
        };
        let mut bb = first.bounding_box();
        for c in iter {
            bb = bb.union(&c.bounding_box());
        }
        bb
    }
}

impl<C> IntoIterator for CurveSet<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.into_iter()
    }
}

impl<'a, C> IntoIterator for &'a CurveSet<C> {
    type Item = &'a C;
    type IntoIter = core::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

impl<C> Mul<CurveSet<C>> for Affine
where
    Affine: Mul<C, Output = C>,
{
    type Output = CurveSet<C>;

    fn mul(self, other: CurveSet<C>) -> CurveSet<C> {
        CurveSet {
            curves: other.curves.into_iter().map(|c| self * c).collect(),
        }
    }
}
