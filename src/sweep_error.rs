//! SweepError: unified error type for tri-sweep public APIs.
//!
//! Every fallible operation in the crate reports through this enum so callers
//! can handle mesh validation, geometry, and ordering failures uniformly and
//! without panics.

use crate::topology::cell::CellId;
use thiserror::Error;

/// Unified error type for sweep-order resolution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SweepError {
    /// Direction is at (or numerically past) normal incidence; the in-plane
    /// polar angle is undefined there.
    #[error("direction has omega_z = {omega_z}; polar angle undefined at normal incidence")]
    NormalIncidence { omega_z: f64 },
    /// A cell edge collapsed to (numerically) zero length.
    #[error("cell {cell} has a zero-length edge (local edge {edge})")]
    DegenerateEdge { cell: CellId, edge: usize },
    /// Triangle with (numerically) zero area but no zero-length edge.
    #[error("cell {cell} has zero area")]
    DegenerateCell { cell: CellId },
    /// The destructive topological sort covered fewer vertices than the mesh
    /// has cells, which means the dependency graph contained a cycle.
    #[error("topological order covered {ordered} of {cells} cells; dependency graph contains a cycle")]
    IncompleteOrder { ordered: usize, cells: usize },
    /// A cell names a point index beyond the coordinate array.
    #[error("cell {cell} references point {point} beyond the coordinate array")]
    PointOutOfBounds { cell: CellId, point: usize },
    /// A neighbor entry names a cell index beyond the cell count.
    #[error("cell {cell} lists neighbor {neighbor} beyond the cell count")]
    NeighborOutOfBounds { cell: CellId, neighbor: usize },
    /// A cell lists itself as its own neighbor.
    #[error("cell {cell} lists itself as a neighbor")]
    SelfNeighbor { cell: CellId },
    /// Adjacency is one-sided: `cell` sees `neighbor` but not vice versa.
    #[error("cell {cell} lists neighbor {neighbor}, but {neighbor} does not list {cell}")]
    AsymmetricNeighbor { cell: CellId, neighbor: CellId },
    /// The neighbor table and the cell table disagree in length.
    #[error("mesh has {cells} cells but {neighbors} neighbor rows")]
    NeighborCountMismatch { cells: usize, neighbors: usize },
    /// More than two cells claim the same undirected edge.
    #[error("edge ({a}, {b}) is shared by more than two cells")]
    NonManifoldEdge { a: usize, b: usize },
    /// A structured generator was asked for a mesh with no cells.
    #[error("structured mesh extent {nx}x{ny} must be positive in both directions")]
    EmptyExtent { nx: usize, ny: usize },
    /// The graph's downwind and upwind adjacency lists disagree.
    #[error("downwind/upwind mirror broken for edge {parent} -> {child}")]
    InconsistentMirror { parent: CellId, child: CellId },
}
