//! # tri-sweep
//!
//! tri-sweep resolves per-direction sweep orderings for discrete-ordinates
//! radiation transport on unstructured triangular meshes. Given cell geometry,
//! a vertex-opposite neighbor table, and a set of angular directions, it
//! classifies each cell's downwind edges, assembles the directed dependency
//! graph of flux flow, and topologically orders the cells so each one is
//! visited only after every upwind contributor.
//!
//! ## Features
//! - Triangular mesh container with neighbor-table validation and cached
//!   per-cell geometry frames
//! - Geometric downwind-edge classification from interior angles, robust to
//!   clockwise input and near-axis directions
//! - Dependency graph with destructive topological ordering and cycle
//!   detection, plus a non-destructive breadth-first probe
//! - Batch resolution over a direction quadrature set, parallelized with
//!   Rayon when the `rayon` feature is enabled
//! - Structured-mesh generator for rectangular domains, used throughout the
//!   test suite
//!
//! ## Determinism
//!
//! Orderings are fully determined by the mesh and the direction set: roots
//! seed in ascending cell id and traversal order is fixed, so repeated runs
//! (serial or Rayon-parallel) produce bitwise-identical tables.
//!
//! ## Usage
//! Add `tri-sweep` as a dependency in your `Cargo.toml` and enable features
//! as needed:
//!
//! ```toml
//! [dependencies]
//! tri-sweep = "0.3.0"
//! # Optional features:
//! # features = ["check-invariants"]
//! ```

// Re-export our major subsystems:
pub mod debug_invariants;
pub mod geometry;
pub mod mesh;
pub mod quadrature;
pub mod sweep;
pub mod sweep_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::CellFrame;
    pub use crate::mesh::TriMesh;
    pub use crate::mesh::generation::{rectangle, unit_square};
    pub use crate::quadrature::Direction;
    pub use crate::sweep::{SweepTable, compute_sweep_orders, sweep_order_for_angle};
    pub use crate::sweep_error::SweepError;
    pub use crate::topology::{CellId, DependencyGraph};
}
