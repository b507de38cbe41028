//! Per-cell angular frame and downwind classification.
//!
//! [`CellFrame`] captures the direction-independent half of edge
//! classification once per cell: the orientation-corrected angle of the
//! first edge, the interior angles, and the CCW-consistent neighbor triple.
//! Classifying a direction is then a handful of comparisons, repeated for
//! every cell and every direction by the sweep builder.
//!
//! Angular convention: a triangle's three vertex fans split the full turn
//! around the cell into sectors `[0, θ0)`, `[θ0, π − θ1)`, `[π − θ1, π)`
//! when the incidence angle is expressed relative to the first edge; the
//! second half-turn mirrors the first with entry and exit swapped. Which
//! sector the incidence angle lands in decides the downwind edge(s).

use crate::geometry::{
    ANGLE_EPS, AXIS_EPS, DEGENERATE_EPS, angle_from_vector, cross, dot, norm, sub,
};
use crate::sweep_error::SweepError;
use crate::topology::cell::CellId;
use std::f64::consts::{PI, TAU};

/// Direction-independent classification data for one triangular cell.
#[derive(Debug, Clone)]
pub struct CellFrame {
    /// Angle of the v0 -> v1 edge after CCW correction, wrap-adjusted.
    phi1: f64,
    /// Interior angles at the three vertices, CCW order.
    interior: [f64; 3],
    /// Neighbor opposite each vertex, CCW-consistent.
    neighbors: [Option<CellId>; 3],
}

impl CellFrame {
    /// Builds the frame for `cell` from its vertex coordinates and
    /// opposite-vertex neighbor triple, both in stored order. Clockwise
    /// input is corrected here by swapping vertex 1 and 2 together with
    /// their opposite neighbors.
    ///
    /// # Errors
    ///
    /// [`SweepError::DegenerateEdge`] when an edge is numerically
    /// zero-length (the edge index refers to the stored vertex order),
    /// [`SweepError::DegenerateCell`] when the triangle has no area with all
    /// edges intact.
    pub fn build(
        cell: CellId,
        points: [[f64; 2]; 3],
        neighbors: [Option<CellId>; 3],
    ) -> Result<Self, SweepError> {
        let mut v = points;
        let mut n = neighbors;
        for e in 0..3 {
            if norm(sub(v[(e + 1) % 3], v[e])) < DEGENERATE_EPS {
                return Err(SweepError::DegenerateEdge { cell, edge: e });
            }
        }
        let det = cross(sub(v[1], v[0]), sub(v[2], v[0]));
        if det.abs() < DEGENERATE_EPS {
            return Err(SweepError::DegenerateCell { cell });
        }
        if det < 0.0 {
            v.swap(1, 2);
            n.swap(1, 2);
        }

        let mut phi1 = angle_from_vector(sub(v[1], v[0]));
        let phi2 = angle_from_vector(sub(v[2], v[0]));
        // First edge on the reference axis while the second sits past π
        // reads as the pair (≈0, >π); lift phi1 a full turn so incidence
        // angles relative to it land in the right revolution. Only phi1
        // feeds the incidence angle, so the mirrored correction on phi2 is
        // omitted.
        if phi1 < AXIS_EPS && phi2 > PI {
            phi1 = TAU;
        }

        let mut interior = [0.0; 3];
        for i in 0..3 {
            let a = sub(v[(i + 1) % 3], v[i]);
            let b = sub(v[(i + 2) % 3], v[i]);
            // Rounding can push the ratio a hair outside [-1, 1].
            let cos = (dot(a, b) / (norm(a) * norm(b))).clamp(-1.0, 1.0);
            interior[i] = cos.acos();
        }

        Ok(Self {
            phi1,
            interior,
            neighbors: n,
        })
    }

    /// Interior angles at the three vertices, in CCW-corrected order.
    pub fn interior_angles(&self) -> [f64; 3] {
        self.interior
    }

    /// Neighbor opposite each vertex, in CCW-corrected order.
    pub fn neighbors(&self) -> [Option<CellId>; 3] {
        self.neighbors
    }

    /// Neighbors strictly downwind of this cell for the in-plane polar
    /// angle `theta_inc` (counter-clockwise from the reference axis, in
    /// `[0, 2π)`).
    ///
    /// Yields 0, 1, or 2 cells: one when the flow exits through a single
    /// edge, two when it exits past a vertex into both adjacent edges, none
    /// when every exit edge is a boundary.
    ///
    /// Sector comparisons carry a `1e-9` absolute tolerance, and an angle
    /// within tolerance of a sector boundary belongs to the next sector
    /// counter-clockwise. In particular a direction running exactly along a
    /// triangle edge classifies with the fan just past that edge; an
    /// incidence angle within `1e-9` of `2π` is treated as exactly 0.
    pub fn downwind_neighbors(&self, theta_inc: f64) -> impl Iterator<Item = CellId> {
        let mut theta_p = theta_inc - self.phi1;
        if theta_p < 0.0 {
            theta_p += TAU;
        }
        if (theta_p - TAU).abs() < ANGLE_EPS {
            theta_p = 0.0;
        }
        let half = theta_p % PI;
        let n = &self.neighbors;
        let pair: [Option<CellId>; 2] = if half <= self.interior[0] - ANGLE_EPS {
            if theta_p < PI {
                [n[0], None] // v0 -> e12
            } else {
                [n[1], n[2]] // e12 -> v0
            }
        } else if half <= PI - self.interior[1] - ANGLE_EPS {
            if theta_p < PI {
                [n[0], n[1]] // e01 -> v2
            } else {
                [n[2], None] // v2 -> e01
            }
        } else if theta_p < PI {
            [n[1], None] // v1 -> e20
        } else {
            [n[0], n[2]] // e20 -> v1
        };
        pair.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn c(i: u32) -> CellId {
        CellId::new(i)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    /// Unit right triangle with the right angle at the origin and fake
    /// neighbors on every edge: 10 across the hypotenuse (opposite v0),
    /// 11 across the left edge, 12 across the bottom edge.
    fn right_triangle() -> CellFrame {
        CellFrame::build(
            c(0),
            [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            [Some(c(10)), Some(c(11)), Some(c(12))],
        )
        .unwrap()
    }

    fn downwind(frame: &CellFrame, theta: f64) -> Vec<CellId> {
        frame.downwind_neighbors(theta).collect()
    }

    #[test]
    fn interior_angles_of_right_triangle() {
        let f = right_triangle();
        let [t0, t1, t2] = f.interior_angles();
        assert!(approx(t0, FRAC_PI_2));
        assert!(approx(t1, FRAC_PI_4));
        assert!(approx(t2, FRAC_PI_4));
        assert!(approx(t0 + t1 + t2, PI));
    }

    #[test]
    fn six_sectors_select_expected_neighbors() {
        let f = right_triangle();
        // One angle inside each sector, both half-turns.
        assert_eq!(downwind(&f, PI / 8.0), vec![c(10)]);
        assert_eq!(downwind(&f, 5.0 * PI / 8.0), vec![c(10), c(11)]);
        assert_eq!(downwind(&f, 7.0 * PI / 8.0), vec![c(11)]);
        assert_eq!(downwind(&f, 9.0 * PI / 8.0), vec![c(11), c(12)]);
        assert_eq!(downwind(&f, 13.0 * PI / 8.0), vec![c(12)]);
        assert_eq!(downwind(&f, 15.0 * PI / 8.0), vec![c(10), c(12)]);
    }

    #[test]
    fn sector_boundaries_fall_counterclockwise() {
        let f = right_triangle();
        // Exactly along edge v0 -> v1: the v0 fan keeps it.
        assert_eq!(downwind(&f, 0.0), vec![c(10)]);
        // Exactly along edge v0 -> v2 (the sector bound at θ0): pushed into
        // the two-edge fan past v2.
        assert_eq!(downwind(&f, FRAC_PI_2), vec![c(10), c(11)]);
        // Within tolerance of 2π collapses to 0.
        assert_eq!(downwind(&f, TAU - 1e-10), vec![c(10)]);
    }

    #[test]
    fn boundary_neighbors_are_dropped() {
        let f = CellFrame::build(
            c(0),
            [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            [None, Some(c(11)), None],
        )
        .unwrap();
        assert_eq!(downwind(&f, PI / 8.0), Vec::<CellId>::new());
        assert_eq!(downwind(&f, 5.0 * PI / 8.0), vec![c(11)]);
        assert_eq!(downwind(&f, 9.0 * PI / 8.0), vec![c(11)]);
    }

    #[test]
    fn clockwise_input_is_corrected() {
        // Same triangle, vertices 1 and 2 exchanged, neighbors exchanged to
        // keep the opposite-vertex pairing.
        let cw = CellFrame::build(
            c(0),
            [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]],
            [Some(c(10)), Some(c(12)), Some(c(11))],
        )
        .unwrap();
        let ccw = right_triangle();
        assert_eq!(cw.neighbors(), ccw.neighbors());
        let [a0, a1, a2] = cw.interior_angles();
        let [b0, b1, b2] = ccw.interior_angles();
        assert!(approx(a0, b0) && approx(a1, b1) && approx(a2, b2));
        for k in 0..16 {
            let theta = TAU * (k as f64) / 16.0;
            assert_eq!(downwind(&cw, theta), downwind(&ccw, theta), "theta {theta}");
        }
    }

    #[test]
    fn zero_length_edge_is_reported() {
        let err = CellFrame::build(
            c(3),
            [[0.0, 0.0], [0.0, 0.0], [1.0, 1.0]],
            [None, None, None],
        )
        .unwrap_err();
        assert_eq!(err, SweepError::DegenerateEdge { cell: c(3), edge: 0 });
    }

    #[test]
    fn collinear_triangle_is_reported() {
        let err = CellFrame::build(
            c(4),
            [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]],
            [None, None, None],
        )
        .unwrap_err();
        assert_eq!(err, SweepError::DegenerateCell { cell: c(4) });
    }

    #[test]
    fn axis_straddling_sliver_lifts_phi1() {
        // First edge a hair above the axis, second a hair below π: the wrap
        // correction promotes phi1 to a full turn.
        let f = CellFrame::build(
            c(0),
            [[0.0, 0.0], [1.0, 1e-11], [-1.0, -1e-12]],
            [None, None, None],
        )
        .unwrap();
        assert_eq!(f.phi1, TAU);
    }
}
