//! Triangular mesh container.
//!
//! [`TriMesh`] owns what the external mesh provider hands over: point
//! coordinates, cell-vertex triples, and the opposite-vertex neighbor table.
//! Construction validates the structural invariant (indices in range,
//! adjacency symmetric where both sides exist) so the sweep path can index
//! without re-checking. Geometry derived from the mesh, the per-cell
//! classification frames, is built lazily and cached; the mesh itself is
//! immutable after construction.
//!
//! Neighbor conventions follow the common triangulation layout:
//! `neighbors[c][k]` is the cell across the edge *opposite* local vertex
//! `k`, or `None` on the boundary.

pub mod generation;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use itertools::izip;
use once_cell::sync::OnceCell;

use crate::debug_invariants::DebugInvariants;
use crate::geometry::CellFrame;
use crate::sweep_error::SweepError;
use crate::topology::cell::CellId;

/// Immutable triangular mesh with opposite-vertex adjacency.
///
/// # Example
///
/// ```rust
/// use tri_sweep::mesh::TriMesh;
///
/// // Unit square split along the main diagonal; -1 marks the boundary.
/// let mesh = TriMesh::new(
///     vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
///     vec![[0, 1, 2], [0, 2, 3]],
///     vec![[-1, 1, -1], [-1, -1, 0]],
/// )?;
/// assert_eq!(mesh.n_cells(), 2);
/// # Ok::<(), tri_sweep::sweep_error::SweepError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TriMesh {
    points: Vec<[f64; 2]>,
    cells: Vec<[usize; 3]>,
    neighbors: Vec<[Option<CellId>; 3]>,
    frames: OnceCell<Vec<CellFrame>>,
}

impl TriMesh {
    /// Builds a mesh from the provider's form: neighbor entries are cell
    /// indices with any negative value meaning "no neighbor" (boundary).
    pub fn new(
        points: Vec<[f64; 2]>,
        cells: Vec<[usize; 3]>,
        raw_neighbors: Vec<[i32; 3]>,
    ) -> Result<Self, SweepError> {
        let neighbors = raw_neighbors
            .into_iter()
            .map(|row| {
                row.map(|n| {
                    if n >= 0 {
                        Some(CellId::new(n as u32))
                    } else {
                        None
                    }
                })
            })
            .collect();
        Self::from_parts(points, cells, neighbors)
    }

    /// Builds a mesh from already-typed parts.
    pub fn from_parts(
        points: Vec<[f64; 2]>,
        cells: Vec<[usize; 3]>,
        neighbors: Vec<[Option<CellId>; 3]>,
    ) -> Result<Self, SweepError> {
        let mesh = Self {
            points,
            cells,
            neighbors,
            frames: OnceCell::new(),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Builds a mesh without a neighbor table, deriving adjacency by
    /// matching shared edges: two cells are neighbors when they use the
    /// same undirected vertex pair.
    ///
    /// # Errors
    ///
    /// [`SweepError::NonManifoldEdge`] when a third cell claims an already
    /// paired edge, plus the usual validation errors.
    pub fn from_cells(points: Vec<[f64; 2]>, cells: Vec<[usize; 3]>) -> Result<Self, SweepError> {
        let neighbors = derive_neighbors(&cells)?;
        Self::from_parts(points, cells, neighbors)
    }

    /// Number of points.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// All point coordinates.
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// All cell-vertex triples.
    pub fn cells(&self) -> &[[usize; 3]] {
        &self.cells
    }

    /// Cell identifiers in ascending order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len()).map(CellId::from_index)
    }

    /// Vertex indices of one cell.
    ///
    /// # Panics
    ///
    /// Panics when `c` is out of range.
    pub fn cell_vertices(&self, c: CellId) -> [usize; 3] {
        self.cells[c.index()]
    }

    /// Corner coordinates of one cell, in stored vertex order.
    ///
    /// # Panics
    ///
    /// Panics when `c` is out of range.
    pub fn cell_points(&self, c: CellId) -> [[f64; 2]; 3] {
        self.corners_of(&self.cells[c.index()])
    }

    /// Neighbor triple of one cell (opposite-vertex convention).
    ///
    /// # Panics
    ///
    /// Panics when `c` is out of range.
    pub fn cell_neighbors(&self, c: CellId) -> [Option<CellId>; 3] {
        self.neighbors[c.index()]
    }

    /// `true` when the cell touches the boundary on at least one edge.
    ///
    /// # Panics
    ///
    /// Panics when `c` is out of range.
    pub fn is_boundary_cell(&self, c: CellId) -> bool {
        self.neighbors[c.index()].iter().any(Option::is_none)
    }

    /// The per-cell classification frames, built on first use and cached.
    ///
    /// Safe to call from several threads; the first successful build wins.
    ///
    /// # Errors
    ///
    /// Degenerate geometry surfaces here. Failed builds are not cached, so
    /// each call on a degenerate mesh re-reports the same error.
    pub fn frames(&self) -> Result<&[CellFrame], SweepError> {
        self.frames
            .get_or_try_init(|| self.build_frames())
            .map(Vec::as_slice)
    }

    fn corners_of(&self, verts: &[usize; 3]) -> [[f64; 2]; 3] {
        [
            self.points[verts[0]],
            self.points[verts[1]],
            self.points[verts[2]],
        ]
    }

    fn build_frames(&self) -> Result<Vec<CellFrame>, SweepError> {
        izip!(&self.cells, &self.neighbors)
            .enumerate()
            .map(|(i, (verts, nbrs))| {
                CellFrame::build(CellId::from_index(i), self.corners_of(verts), *nbrs)
            })
            .collect()
    }

    fn validate(&self) -> Result<(), SweepError> {
        if self.cells.len() != self.neighbors.len() {
            return Err(SweepError::NeighborCountMismatch {
                cells: self.cells.len(),
                neighbors: self.neighbors.len(),
            });
        }
        for (i, (verts, nbrs)) in izip!(&self.cells, &self.neighbors).enumerate() {
            let cell = CellId::from_index(i);
            for &p in verts {
                if p >= self.points.len() {
                    return Err(SweepError::PointOutOfBounds { cell, point: p });
                }
            }
            for &nb in nbrs.iter().flatten() {
                if nb.index() >= self.cells.len() {
                    return Err(SweepError::NeighborOutOfBounds {
                        cell,
                        neighbor: nb.index(),
                    });
                }
                if nb == cell {
                    return Err(SweepError::SelfNeighbor { cell });
                }
            }
        }
        // Adjacency must be mutual wherever both sides exist.
        for (i, nbrs) in self.neighbors.iter().enumerate() {
            let cell = CellId::from_index(i);
            for &nb in nbrs.iter().flatten() {
                let mutual = self.neighbors[nb.index()]
                    .iter()
                    .flatten()
                    .any(|&back| back == cell);
                if !mutual {
                    return Err(SweepError::AsymmetricNeighbor { cell, neighbor: nb });
                }
            }
        }
        Ok(())
    }
}

impl DebugInvariants for TriMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TriMesh");
    }

    fn validate_invariants(&self) -> Result<(), SweepError> {
        self.validate()
    }
}

/// Opposite-vertex neighbor table from shared-edge matching.
fn derive_neighbors(cells: &[[usize; 3]]) -> Result<Vec<[Option<CellId>; 3]>, SweepError> {
    let mut neighbors = vec![[None; 3]; cells.len()];
    // Undirected edge -> first (cell, opposite-vertex slot) seen.
    let mut first_owner: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
    for (i, verts) in cells.iter().enumerate() {
        for k in 0..3 {
            let (a, b) = (verts[(k + 1) % 3], verts[(k + 2) % 3]);
            let key = if a <= b { (a, b) } else { (b, a) };
            match first_owner.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert((i, k));
                }
                Entry::Occupied(slot) => {
                    let (j, opp) = *slot.get();
                    if neighbors[j][opp].is_some() {
                        return Err(SweepError::NonManifoldEdge { a: key.0, b: key.1 });
                    }
                    neighbors[j][opp] = Some(CellId::from_index(i));
                    neighbors[i][k] = Some(CellId::from_index(j));
                }
            }
        }
    }
    Ok(neighbors)
}
