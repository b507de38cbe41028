//! Sweep-order resolution.
//!
//! The builder walks the direction set, projects each direction onto the
//! classifier's in-plane polar angle, assembles a fresh dependency graph
//! from the per-cell downwind classification, and turns the destructive
//! topological sort into one rank column of the output table.
//!
//! Directions are independent: they share only the read-only mesh, so the
//! outer loop parallelizes freely (`rayon` feature) and a failure in one
//! direction never disturbs another.

pub mod table;

pub use table::SweepTable;

use log::{debug, trace, warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::debug_invariants::DebugInvariants;
use crate::mesh::TriMesh;
use crate::quadrature::Direction;
use crate::sweep_error::SweepError;
use crate::topology::cell::CellId;
use crate::topology::graph::DependencyGraph;

/// Valid processing order of all cells for one in-plane polar angle.
///
/// Builds a dependency graph with one vertex per cell, adds an edge for
/// every downwind exit the classifier reports, and orders it. The returned
/// sequence visits every cell exactly once, upwind before downwind.
///
/// # Errors
///
/// Degenerate geometry from frame construction, or an incomplete order when
/// the graph held a cycle (possible only with inconsistent neighbor data).
pub fn sweep_order_for_angle(mesh: &TriMesh, theta_inc: f64) -> Result<Vec<CellId>, SweepError> {
    let frames = mesh.frames()?;
    let mut graph = DependencyGraph::with_cells(mesh.n_cells());
    for (cell, frame) in mesh.cell_ids().zip(frames) {
        for nb in frame.downwind_neighbors(theta_inc) {
            graph.add_edge(cell, nb);
        }
    }
    graph.debug_assert_invariants();
    let order = graph.order_vertices();
    if order.len() != mesh.n_cells() {
        return Err(SweepError::IncompleteOrder {
            ordered: order.len(),
            cells: mesh.n_cells(),
        });
    }
    Ok(order)
}

fn ranks_from_order(order: &[CellId]) -> Vec<u32> {
    let mut ranks = vec![0u32; order.len()];
    for (rank, cell) in order.iter().enumerate() {
        ranks[cell.index()] = rank as u32;
    }
    ranks
}

fn resolve_direction(mesh: &TriMesh, dir: &Direction) -> Result<Vec<u32>, SweepError> {
    let theta = dir.polar_angle().ok_or(SweepError::NormalIncidence {
        omega_z: dir.omega_z,
    })?;
    let order = sweep_order_for_angle(mesh, theta)?;
    Ok(ranks_from_order(&order))
}

/// Resolves every direction over one mesh into the rank table.
///
/// Failures are isolated per direction: a failed column records its error
/// (and logs it at `warn` level) while the remaining directions still
/// populate. Column order always matches the input direction order, with
/// or without the `rayon` feature, so repeated runs produce identical
/// tables.
///
/// # Example
///
/// ```rust
/// use tri_sweep::mesh::generation::unit_square;
/// use tri_sweep::quadrature::Direction;
/// use tri_sweep::sweep::compute_sweep_orders;
/// use tri_sweep::topology::cell::CellId;
///
/// let mesh = unit_square(1)?;
/// let east = Direction::new(1.0, 0.0, 0.0, 1.0);
/// let table = compute_sweep_orders(&mesh, &[east]);
/// // +x flow crosses the diagonal from the upper-left cell into the
/// // lower-right one.
/// assert_eq!(table.order(0).unwrap(), vec![CellId::new(1), CellId::new(0)]);
/// # Ok::<(), tri_sweep::sweep_error::SweepError>(())
/// ```
pub fn compute_sweep_orders(mesh: &TriMesh, directions: &[Direction]) -> SweepTable {
    #[cfg(feature = "rayon")]
    let columns: Vec<_> = directions
        .par_iter()
        .map(|d| resolve_direction(mesh, d))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let columns: Vec<_> = directions
        .iter()
        .map(|d| resolve_direction(mesh, d))
        .collect();

    for (i, column) in columns.iter().enumerate() {
        match column {
            Ok(_) => trace!("direction {i}: ordered {} cells", mesh.n_cells()),
            Err(e) => warn!("direction {i}: {e}"),
        }
    }
    let failed = columns.iter().filter(|c| c.is_err()).count();
    debug!(
        "sweep table: {} cells x {} directions, {failed} failed",
        mesh.n_cells(),
        directions.len()
    );
    SweepTable::new(mesh.n_cells(), columns)
}
