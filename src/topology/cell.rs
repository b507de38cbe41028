//! `CellId`: a strong, zero-cost handle for mesh cells.
//!
//! Cells are numbered densely from zero, and the same number serves three
//! roles: index into the mesh's cell arrays, vertex key in the dependency
//! graph, and row index in the sweep table. Keeping all three in one opaque
//! type makes that 1:1 coupling explicit instead of an accident of loop
//! indices.
//!
//! Unlike sentinel-based neighbor tables (where a negative value means
//! "boundary"), absence is expressed as `Option<CellId>`, so every live
//! `CellId` is a real cell and 0 is valid.

use std::fmt;

/// Identifier of one triangular cell.
///
/// # Memory layout
/// `repr(transparent)` over `u32`: same size and alignment as the raw index,
/// cheap to copy and to store in adjacency lists.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct CellId(u32);

impl CellId {
    /// Creates a `CellId` from a raw cell number.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tri_sweep::topology::cell::CellId;
    /// let c = CellId::new(3);
    /// assert_eq!(c.get(), 3);
    /// ```
    #[inline]
    pub const fn new(raw: u32) -> Self {
        CellId(raw)
    }

    /// Creates a `CellId` from a container index.
    ///
    /// # Panics
    ///
    /// Panics if `index` exceeds `u32::MAX`; meshes that large are outside
    /// this crate's design envelope.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        CellId(u32::try_from(index).expect("cell index exceeds u32 range"))
    }

    /// Raw cell number.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The same number widened for indexing into cell arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellId").field(&self.0).finish()
    }
}

/// Prints the numeric id without any wrapper text.
impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
