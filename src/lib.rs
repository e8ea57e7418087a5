// Copyright 2026 the Tondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar parametric curves, composed and clipped by axis-aligned boxes.
//!
//! The tondo library models curves in the plane as maps from a scalar
//! parameter, and keeps working when the parameter domain is infinite: a
//! ray or a full line is as much a curve as a segment is. Curves compose
//! into [`CurveSet`]s and continuous [`PolyCurve`] chains addressed
//! through a single parameter, and the central operation is clipping any
//! of them by a [`ClipBox`], itself possibly unbounded, as in a
//! half-plane.
//!
//! # Examples
//!
//! Clipping a long segment down to the part inside a box:
//! ```
//! use tondo::{clip_continuous, ClipBox, LineSpan, ParamCurve, Point};
//!
//! let seg = LineSpan::segment(Point::new(-5.0, 0.0), Point::new(5.0, 0.0));
//! let bounds = ClipBox::new(-1.0, -1.0, 1.0, 1.0);
//!
//! let clipped = clip_continuous(&seg, &bounds);
//! assert_eq!(clipped.len(), 1);
//! let frag = clipped.get(0).unwrap();
//! assert_eq!(frag.start(), Point::new(-1.0, 0.0));
//! assert_eq!(frag.end(), Point::new(1.0, 0.0));
//! ```
//!
//! Clipping a full line by a half-plane leaves it unbounded:
//! ```
//! use tondo::{ClipBox, ContinuousCurve, LineSpan, ParamCurve, Point, Vec2};
//!
//! let line = LineSpan::line(Point::new(0.0, 0.0), Vec2::new(1.0, 0.0));
//! let half = ClipBox::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY, 1.0);
//!
//! let clipped = line.clip(&half);
//! assert_eq!(clipped.len(), 1);
//! assert!(!clipped.get(0).unwrap().is_bounded());
//! ```
//!
//! # Feature Flags
//!
//! The following crate [feature flags](https://doc.rust-lang.org/cargo/reference/features.html#dependency-features) are available:
//!
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on various types.
//! - `schemars`: Add best-effort support for using tondo types in JSON schemas using [schemars][].
//!
//! [schemars]: https://docs.rs/schemars

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
// Feel free to send a PR that solves one or more of these.
#![allow(
    elided_lifetimes_in_paths,
    trivial_numeric_casts,
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::partial_pub_fields,
    clippy::unseparated_literal_suffix,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

mod affine;
mod clip;
mod clip_box;
mod curve_seg;
mod curve_set;
mod line_span;
mod param_curve;
mod point;
mod poly_curve;
mod polyline;
mod vec2;

pub use crate::affine::{Affine, SingularTransformError};
pub use crate::clip::{choose_position, clip_continuous, clip_set};
pub use crate::clip_box::ClipBox;
pub use crate::curve_seg::CurveSeg;
pub use crate::curve_set::{CurveSet, from_unit_segment, to_unit_segment};
pub use crate::line_span::LineSpan;
pub use crate::param_curve::{
    ACCURACY, ContinuousCurve, Nearest, ParamCurve, PathSink, UnboundedCurveError,
};
pub use crate::point::Point;
pub use crate::poly_curve::PolyCurve;
pub use crate::polyline::Polyline;
pub use crate::vec2::Vec2;
