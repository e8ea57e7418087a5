// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.

use core::fmt;
use core::ops::{Mul, MulAssign};

use crate::{ACCURACY, Point, Vec2, point::near};

/// A 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

/// The error returned when inverting an [`Affine`] whose determinant is
/// within [`ACCURACY`] of zero.
///
/// Such a transform collapses the plane onto a line or a point, so no
/// inverse exists. Reporting this as an error keeps NaN coefficients from
/// silently leaking into downstream geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingularTransformError;

impl fmt::Display for SingularTransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transform is singular and cannot be inverted")
    }
}

impl std::error::Error for SingularTransformError {}

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::scale(1.0);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    ///
    /// The idea is that `(A * B) * v == A * (B * v)`, where `*` is the
    /// [`Mul`] trait.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline(always)]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing non-uniform scaling
    /// with different scale values for x and y.
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Affine {
        Affine([s_x, 0.0, 0.0, s_y, 0.0, 0.0])
    }

    /// An affine transform representing uniform scaling centered on a
    /// point other than the origin.
    #[inline]
    pub fn scale_about(s: f64, center: impl Into<Point>) -> Affine {
        let center = center.into().to_vec2();
        Self::translate(-center)
            .then_scale(s)
            .then_translate(center)
    }

    /// An affine transform representing rotation by `th` radians.
    ///
    /// The convention for rotation is that a positive angle rotates a
    /// positive X direction into positive Y. Thus, in a Y-down coordinate
    /// system (as is common for graphics), it is a clockwise rotation, and
    /// in Y-up (as is common for math), it is anti-clockwise.
    ///
    /// Angles within [`ACCURACY`] of a multiple of π/2 are snapped to the
    /// exact quarter turn, so that, for example, rotating an axis-aligned
    /// box by `FRAC_PI_2` yields exactly axis-aligned results.
    pub fn rotate(th: f64) -> Affine {
        let (s, c) = rotation_coeffs(th);
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing a rotation of `th` radians about
    /// `center`.
    ///
    /// See [`Affine::rotate()`] for more info.
    pub fn rotate_about(th: f64, center: impl Into<Point>) -> Affine {
        let center = center.into().to_vec2();
        Self::translate(-center)
            .then_rotate(th)
            .then_translate(center)
    }

    /// An affine transform representing translation.
    #[inline]
    pub fn translate<V: Into<Vec2>>(p: V) -> Affine {
        let p = p.into();
        Affine([1.0, 0.0, 0.0, 1.0, p.x, p.y])
    }

    /// An affine transformation representing a skew.
    ///
    /// The `skew_x` and `skew_y` parameters represent skew factors for the
    /// horizontal and vertical directions, respectively.
    #[inline]
    pub fn skew(skew_x: f64, skew_y: f64) -> Affine {
        Affine([1.0, skew_y, skew_x, 1.0, 0.0, 0.0])
    }

    /// A rotation by `th` followed by `self`.
    ///
    /// Equivalent to `self * Affine::rotate(th)`.
    #[inline]
    #[must_use]
    pub fn pre_rotate(self, th: f64) -> Self {
        self * Affine::rotate(th)
    }

    /// `self` followed by a rotation of `th`.
    ///
    /// Equivalent to `Affine::rotate(th) * self`.
    #[inline]
    #[must_use]
    pub fn then_rotate(self, th: f64) -> Self {
        Affine::rotate(th) * self
    }

    /// `self` followed by a scale of `scale`.
    ///
    /// Equivalent to `Affine::scale(scale) * self`.
    #[inline]
    #[must_use]
    pub fn then_scale(self, scale: f64) -> Self {
        Affine::scale(scale) * self
    }

    /// `self` followed by a translation of `trans`.
    ///
    /// Equivalent to `Affine::translate(trans) * self`.
    #[inline]
    #[must_use]
    pub fn then_translate(mut self, trans: Vec2) -> Self {
        self.0[4] += trans.x;
        self.0[5] += trans.y;
        self
    }

    /// Get the coefficients of the transform.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// Compute the determinant of this transform.
    #[inline]
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// Compute the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`SingularTransformError`] when the determinant is within
    /// [`ACCURACY`] of zero, in which case no inverse exists.
    pub fn inverse(self) -> Result<Affine, SingularTransformError> {
        let det = self.determinant();
        if det.abs() < ACCURACY {
            return Err(SingularTransformError);
        }
        let inv_det = det.recip();
        Ok(Affine([
            inv_det * self.0[3],
            -inv_det * self.0[1],
            -inv_det * self.0[2],
            inv_det * self.0[0],
            inv_det * (self.0[2] * self.0[5] - self.0[3] * self.0[4]),
            inv_det * (self.0[1] * self.0[4] - self.0[0] * self.0[5]),
        ]))
    }

    /// Is this transform the identity, within [`ACCURACY`]?
    pub fn is_identity(self) -> bool {
        self.approx_eq(Affine::IDENTITY)
    }

    /// Is this transform direct, i.e. does it preserve the orientation of
    /// transformed shapes?
    #[inline]
    pub fn is_direct(self) -> bool {
        self.determinant() > 0.0
    }

    /// Is this transform an isometry, i.e. a compound of translation,
    /// rotation and reflection?
    ///
    /// An isometry keeps distances (and hence areas) unchanged, but may
    /// flip orientation.
    pub fn is_isometry(self) -> bool {
        let [a, b, c, d, ..] = self.0;
        (a * a + b * b - 1.0).abs() < ACCURACY
            && (c * c + d * d - 1.0).abs() < ACCURACY
            && (a * c + b * d).abs() < ACCURACY
    }

    /// Is this transform a motion, i.e. a compound of translations and
    /// rotations?
    ///
    /// A motion is a direct isometry: it keeps both distances and
    /// orientation unchanged.
    pub fn is_motion(self) -> bool {
        self.is_isometry() && (self.determinant() - 1.0).abs() < ACCURACY
    }

    /// Is this transform a similarity, i.e. does it keep shapes unchanged
    /// up to a uniform scale factor?
    pub fn is_similarity(self) -> bool {
        let [a, b, c, d, ..] = self.0;
        let k2 = self.determinant().abs();
        (a * a + b * b - k2).abs() < ACCURACY
            && (c * c + d * d - k2).abs() < ACCURACY
            && (a * a + c * c - k2).abs() < ACCURACY
            && (b * b + d * d - k2).abs() < ACCURACY
    }

    /// Returns `true` if every coefficient of `other` is within
    /// [`ACCURACY`] of the corresponding coefficient of `self`.
    pub fn approx_eq(self, other: Affine) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| near(*a, *b))
    }

    /// Is this map finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Is this map NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.0.iter().any(|c| c.is_nan())
    }

    /// Returns the translation part of this affine map.
    #[inline(always)]
    pub fn translation(self) -> Vec2 {
        Vec2 {
            x: self.0[4],
            y: self.0[5],
        }
    }

    /// Apply only the linear part of the map, suitable for direction
    /// vectors, which are unaffected by translation.
    #[inline]
    pub(crate) fn apply_linear(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.0[0] * v.x + self.0[2] * v.y,
            self.0[1] * v.x + self.0[3] * v.y,
        )
    }
}

/// `(sin, cos)` of an angle, with exact values when the angle is within
/// [`ACCURACY`] of a multiple of π/2.
fn rotation_coeffs(th: f64) -> (f64, f64) {
    use core::f64::consts::FRAC_PI_2;
    let th = th.rem_euclid(core::f64::consts::TAU);
    let k = (th / FRAC_PI_2).round();
    if (k * FRAC_PI_2 - th).abs() < ACCURACY {
        match (k as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        th.sin_cos()
    }
}

impl Default for Affine {
    #[inline(always)]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
        assert_near(Affine::skew(0.0, 0.0) * p, p);
        assert_near(Affine::skew(2.0, 4.0) * p, Point::new(11.0, 16.0));
        assert_near(Affine::scale_about(2.0, (1.0, 1.0)) * p, Point::new(5.0, 7.0));
    }

    #[test]
    fn affine_mul() {
        let a1 = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a2 = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        let pxy = Point::new(1.0, 1.0);
        assert_near(a1 * (a2 * px), (a1 * a2) * px);
        assert_near(a1 * (a2 * py), (a1 * a2) * py);
        assert_near(a1 * (a2 * pxy), (a1 * a2) * pxy);
    }

    #[test]
    fn affine_inv() {
        let a = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);
        let a_inv = a.inverse().unwrap();

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        let pxy = Point::new(1.0, 1.0);
        assert_near(a * (a_inv * px), px);
        assert_near(a * (a_inv * py), py);
        assert_near(a_inv * (a * px), px);
        assert_near(a_inv * (a * py), py);
        assert_near(a_inv * (a * pxy), pxy);
    }

    #[test]
    fn singular_inverse_is_an_error() {
        // collapses the plane onto the line y = x
        let collapse = Affine::new([1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(collapse.inverse(), Err(SingularTransformError));
        // near-singular within tolerance counts as singular
        let nearly = Affine::new([1.0, 1.0, 1.0, 1.0 + 1e-14, 0.0, 0.0]);
        assert!(nearly.inverse().is_err());
    }

    #[test]
    fn quarter_turns_are_exact() {
        let quarter = Affine::rotate(PI / 2.0);
        assert_eq!(quarter.as_coeffs(), [0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
        let half = Affine::rotate(PI);
        assert_eq!(half.as_coeffs(), [-1.0, 0.0, 0.0, -1.0, 0.0, 0.0]);
        let full = Affine::rotate(2.0 * PI);
        assert!(full.is_identity());
        // a generic angle is not snapped
        assert!(Affine::rotate(1.0).as_coeffs()[0] != 1.0f64.cos().round());
    }

    #[test]
    fn classification() {
        let translation = Affine::translate((3.0, -2.0));
        let rotation = Affine::rotate(0.7);
        let reflection = Affine::scale_non_uniform(-1.0, 1.0);
        let scaling = Affine::scale(2.0);
        let shear = Affine::skew(1.0, 0.0);

        assert!(translation.is_isometry() && translation.is_motion());
        assert!(rotation.is_isometry() && rotation.is_motion());
        assert!(reflection.is_isometry() && !reflection.is_motion());
        assert!(!reflection.is_direct());
        assert!(!scaling.is_isometry() && scaling.is_similarity());
        assert!(!shear.is_similarity());
        assert!((rotation * scaling).is_similarity());
        assert!(Affine::IDENTITY.is_identity());
        assert!(!translation.is_identity());
    }
}
