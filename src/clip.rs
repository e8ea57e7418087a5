// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping curves by axis-aligned boxes.

use smallvec::SmallVec;

use crate::{ClipBox, ContinuousCurve, CurveSet, point::near};

/// A representative position within the interval `[t0, t1]`.
///
/// The midpoint when both bounds are finite; a fixed offset of 10 from
/// the finite bound when the other is infinite; zero when both are. Used
/// wherever the clipper needs to sample a curve strictly between two
/// known positions.
pub fn choose_position(t0: f64, t1: f64) -> f64 {
    if t0.is_infinite() {
        if t1.is_infinite() {
            0.0
        } else {
            t1 - 10.0
        }
    } else if t1.is_infinite() {
        t0 + 10.0
    } else {
        (t0 + t1) / 2.0
    }
}

/// Insert `t` into a sorted position list, unless a position within
/// [`ACCURACY`](crate::ACCURACY) is already present.
fn insert_position(cuts: &mut SmallVec<[f64; 8]>, t: f64) {
    for (i, &c) in cuts.iter().enumerate() {
        if near(c, t) {
            return;
        }
        if t < c {
            cuts.insert(i, t);
            return;
        }
    }
    cuts.push(t);
}

/// Clip a continuous curve by an axis-aligned box, returning the portions
/// of the curve lying inside it, in traversal order.
///
/// The boundary counts as inside. Positions where the curve merely
/// touches the boundary without crossing do not split the result. A
/// closed curve whose start lies inside the box yields a fragment that
/// runs through its seam rather than being split there.
///
/// Unbounded curves are fully supported: clipping a line by a bounded box
/// yields a segment-like fragment, and clipping by an unbounded box can
/// yield unbounded fragments.
pub fn clip_continuous<C: ContinuousCurve>(curve: &C, bounds: &ClipBox) -> CurveSet<C> {
    let d = curve.domain();

    // Positions where the curve crosses the box boundary. Intersection
    // points are taken back to curve positions by projection, which is
    // robust for points only on the curve up to roundoff.
    let mut cuts: SmallVec<[f64; 8]> = SmallVec::new();
    for edge in bounds.edges() {
        for p in curve.line_intersections(&edge) {
            insert_position(&mut cuts, curve.nearest(p).t);
        }
    }

    // Tangency filter: sample between consecutive cut positions and keep
    // only the cuts where the inside/outside state actually flips.
    if !cuts.is_empty() {
        let mut samples = Vec::with_capacity(cuts.len() + 2);
        samples.push(d.start);
        samples.extend_from_slice(&cuts);
        samples.push(d.end);
        let flags: Vec<bool> = samples
            .windows(2)
            .map(|w| bounds.contains(curve.eval(choose_position(w[0], w[1]))))
            .collect();
        let mut filtered = SmallVec::new();
        for (j, &t) in cuts.iter().enumerate() {
            if flags[j] != flags[j + 1] {
                filtered.push(t);
            }
        }
        cuts = filtered;
    }

    // No crossings left: the curve is entirely inside or entirely
    // outside, decided by one representative sample.
    if cuts.is_empty() {
        let sample = curve.eval(choose_position(d.start, d.end));
        return if bounds.contains(sample) {
            CurveSet::from_raw(vec![curve.clone()])
        } else {
            CurveSet::new()
        };
    }

    let mut result = Vec::new();
    let p0 = curve.eval(d.start);
    let mut inside = bounds.contains(p0);
    let mut touch = false;

    if bounds.on_boundary(p0) {
        // The curve starts on the boundary itself; whether the first
        // piece is in or out is decided by probing just past the start.
        touch = true;
        inside = false;
        cuts.retain(|t| !near(*t, d.start));
        let next = cuts.first().copied().unwrap_or(d.end);
        if bounds.contains(curve.eval(choose_position(d.start, next))) {
            if cuts.is_empty() {
                return CurveSet::from_raw(vec![curve.clone()]);
            }
            result.push(curve.subcurve(d.start..cuts[0]));
            cuts.remove(0);
        }
    }

    // When a closed curve starts inside, the fragment containing the
    // start wraps through the seam; remember where it must end.
    let mut seam = None;
    if inside && !touch && !cuts.is_empty() {
        if curve.is_closed() {
            seam = Some(cuts.remove(0));
        } else {
            result.push(curve.subcurve(d.start..cuts.remove(0)));
        }
    }

    // The remaining cuts alternate entering and leaving the box.
    let mut i = 0;
    while i < cuts.len() {
        let a = cuts[i];
        let b = if i + 1 < cuts.len() {
            cuts[i + 1]
        } else if let Some(s) = seam {
            // reversed range: wraps around the closed curve's seam
            s
        } else {
            d.end
        };
        // a final cut at the very end of the domain delimits nothing
        if !near(a, b) {
            result.push(curve.subcurve(a..b));
        }
        i += 2;
    }

    CurveSet::from_raw(result)
}

/// Clip every curve of a set by the box and collect the surviving
/// fragments, in order, into one flat set.
pub fn clip_set<C: ContinuousCurve>(set: &CurveSet<C>, bounds: &ClipBox) -> CurveSet<C> {
    let mut out = Vec::new();
    for c in set {
        out.extend(clip_continuous(c, bounds));
    }
    CurveSet::from_raw(out)
}
