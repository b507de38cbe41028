//! Planar geometry for edge classification.
//!
//! Small free helpers over `[f64; 2]` vectors, the crate's angle
//! convention, and the tolerance constants classification is contracted to.
//! The per-cell classification itself lives in [`frame`].

pub mod frame;

pub use frame::CellFrame;

use std::f64::consts::{FRAC_PI_2, TAU};

/// Absolute tolerance for sector-boundary angle comparisons.
pub(crate) const ANGLE_EPS: f64 = 1e-9;
/// Below this, an edge angle counts as lying on the reference axis.
pub(crate) const AXIS_EPS: f64 = 1e-10;
/// Below this, an edge direction counts as vertical.
pub(crate) const VERTICAL_EPS: f64 = 1e-8;
/// Degeneracy tolerance for edge lengths and (doubled) triangle areas.
pub(crate) const DEGENERATE_EPS: f64 = 1e-12;

#[inline]
pub(crate) fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
pub(crate) fn dot(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

/// z-component of the 3-D cross product of two in-plane vectors.
#[inline]
pub(crate) fn cross(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

#[inline]
pub(crate) fn norm(a: [f64; 2]) -> f64 {
    dot(a, a).sqrt()
}

/// Counter-clockwise angle of a planar vector from the +x reference axis,
/// in `[0, 2π)`.
///
/// Near-vertical vectors (`|dx| < 1e-8`) snap to exactly `π/2` or `3π/2` so
/// grid-aligned edges classify identically regardless of rounding in the
/// coordinates. Note the asymmetry near the reference axis itself: a vector
/// pointing along +x with a tiny negative `dy` reads as just under `2π`, not
/// 0; the frame's wrap correction accounts for that.
pub fn angle_from_vector(v: [f64; 2]) -> f64 {
    if v[0].abs() < VERTICAL_EPS {
        if v[1] > 0.0 { FRAC_PI_2 } else { 3.0 * FRAC_PI_2 }
    } else {
        (TAU + v[1].atan2(v[0])) % TAU
    }
}
