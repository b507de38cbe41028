//! The cells × directions rank table.

use crate::sweep_error::SweepError;
use crate::topology::cell::CellId;

/// Aggregate result of resolving every direction over one mesh.
///
/// Rows are cells, columns are directions (in input order), and an entry is
/// a rank: the 0-based position at which that cell must be processed when
/// sweeping that direction. A direction that failed keeps its error in
/// place of a column; the rest of the table is unaffected.
///
/// Tables are fully populated by
/// [`compute_sweep_orders`](crate::sweep::compute_sweep_orders) and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepTable {
    cells: usize,
    columns: Vec<Result<Vec<u32>, SweepError>>,
}

impl SweepTable {
    pub(crate) fn new(cells: usize, columns: Vec<Result<Vec<u32>, SweepError>>) -> Self {
        Self { cells, columns }
    }

    /// Number of mesh cells (rows).
    pub fn n_cells(&self) -> usize {
        self.cells
    }

    /// Number of directions (columns).
    pub fn n_directions(&self) -> usize {
        self.columns.len()
    }

    /// `true` when every direction resolved to a full column.
    pub fn is_complete(&self) -> bool {
        self.columns.iter().all(Result::is_ok)
    }

    /// Rank column of one direction: `column[cell] = rank`.
    ///
    /// # Panics
    ///
    /// Panics when `direction` is out of range.
    pub fn column(&self, direction: usize) -> Result<&[u32], &SweepError> {
        match &self.columns[direction] {
            Ok(ranks) => Ok(ranks.as_slice()),
            Err(e) => Err(e),
        }
    }

    /// Rank of `cell` in one direction.
    ///
    /// # Panics
    ///
    /// Panics when `direction` or `cell` is out of range.
    pub fn rank(&self, cell: CellId, direction: usize) -> Result<u32, &SweepError> {
        self.column(direction).map(|ranks| ranks[cell.index()])
    }

    /// Processing sequence of one direction: the inverse permutation of the
    /// rank column, cells in the order a sweep visits them.
    ///
    /// # Panics
    ///
    /// Panics when `direction` is out of range.
    pub fn order(&self, direction: usize) -> Result<Vec<CellId>, &SweepError> {
        let ranks = self.column(direction)?;
        let mut order = vec![CellId::new(0); ranks.len()];
        for (cell, &rank) in ranks.iter().enumerate() {
            order[rank as usize] = CellId::from_index(cell);
        }
        Ok(order)
    }

    /// Failed directions with their errors, ascending by column index.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &SweepError)> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().err().map(|e| (i, e)))
    }
}
