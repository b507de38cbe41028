//! Discrete ordinates: unit directions with quadrature weights.
//!
//! Quadrature sets are produced elsewhere; this crate only consumes an
//! ordered sequence of [`Direction`]s and projects each onto the single
//! in-plane polar angle the classifier works with. The weight rides along
//! untouched for the downstream solver-input writer.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// One discrete ordinate: a unit direction and its quadrature weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub omega_x: f64,
    pub omega_y: f64,
    pub omega_z: f64,
    /// Quadrature weight; carried through, never read by the resolver.
    pub weight: f64,
}

impl Direction {
    pub const fn new(omega_x: f64, omega_y: f64, omega_z: f64, weight: f64) -> Self {
        Self {
            omega_x,
            omega_y,
            omega_z,
            weight,
        }
    }

    /// In-plane ordinate at polar angle `theta` (ωz = 0).
    pub fn in_plane(theta: f64, weight: f64) -> Self {
        Self::new(theta.cos(), theta.sin(), 0.0, weight)
    }

    /// Projects the direction onto the classifier's in-plane polar angle:
    /// `θ = arccos(ωx / √(1 − ωz²))`, reflected to `2π − θ` when `ωy < 0`,
    /// giving `θ ∈ [0, 2π)`.
    ///
    /// Returns `None` at (or numerically past) normal incidence,
    /// `|ωz| ≥ 1`, where the in-plane angle is undefined, and for
    /// non-finite components. The cosine ratio is clamped to `[-1, 1]` so a
    /// direction that is unit-length only up to rounding still projects.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tri_sweep::quadrature::Direction;
    /// let east = Direction::new(1.0, 0.0, 0.0, 1.0);
    /// assert_eq!(east.polar_angle(), Some(0.0));
    /// let polar = Direction::new(0.0, 0.0, 1.0, 1.0);
    /// assert_eq!(polar.polar_angle(), None);
    /// ```
    pub fn polar_angle(&self) -> Option<f64> {
        if !(self.omega_z.abs() < 1.0) {
            return None;
        }
        if !self.omega_x.is_finite() || !self.omega_y.is_finite() {
            return None;
        }
        let in_plane = (1.0 - self.omega_z * self.omega_z).sqrt();
        let ratio = self.omega_x / in_plane;
        if !ratio.is_finite() {
            return None;
        }
        let theta = ratio.clamp(-1.0, 1.0).acos();
        let theta = if self.omega_y < 0.0 { TAU - theta } else { theta };
        // acos(-1) reflected would give exactly 2π; keep the half-open range.
        Some(theta % TAU)
    }
}
