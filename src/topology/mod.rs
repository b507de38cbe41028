//! Cell identifiers and the per-direction dependency graph.
//!
//! The graph side of sweep resolution is deliberately unaware of geometry:
//! it deals in [`cell::CellId`] vertices and directed downwind/upwind edges
//! only. Classification (which edges exist for a given direction) lives in
//! [`crate::geometry`]; this module orders whatever it is given.

pub mod cell;
pub mod graph;

pub use cell::CellId;
pub use graph::DependencyGraph;
