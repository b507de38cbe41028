//! Structured triangulations of rectangles.
//!
//! Quick meshes for tests, benches, and callers that just need a grid:
//! each grid quad is split along its lower-left to upper-right diagonal
//! into two counter-clockwise triangles, and adjacency comes from the
//! mesh's own shared-edge matching. Unstructured generation (Delaunay,
//! pin-cell layouts) is someone else's job.

use crate::mesh::TriMesh;
use crate::sweep_error::SweepError;

/// Structured triangulation of `[min, max]` with `nx`×`ny` grid quads,
/// two cells per quad, `2 * nx * ny` cells total.
///
/// Grid quad `(i, j)` becomes cells `2 * (j * nx + i)` (the lower-right
/// half, containing the quad's bottom edge) and `2 * (j * nx + i) + 1`
/// (the upper-left half).
pub fn rectangle(
    nx: usize,
    ny: usize,
    min: [f64; 2],
    max: [f64; 2],
) -> Result<TriMesh, SweepError> {
    if nx == 0 || ny == 0 {
        return Err(SweepError::EmptyExtent { nx, ny });
    }
    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let mut points = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = min[1] + dy * j as f64;
        for i in 0..=nx {
            points.push([min[0] + dx * i as f64, y]);
        }
    }

    let stride = nx + 1;
    let mut cells = Vec::with_capacity(2 * nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * stride + i;
            let v1 = v0 + 1;
            let v3 = v0 + stride;
            let v2 = v3 + 1;
            cells.push([v0, v1, v2]);
            cells.push([v0, v2, v3]);
        }
    }
    TriMesh::from_cells(points, cells)
}

/// `rectangle` over the unit square with `n`×`n` quads.
pub fn unit_square(n: usize) -> Result<TriMesh, SweepError> {
    rectangle(n, n, [0.0, 0.0], [1.0, 1.0])
}
