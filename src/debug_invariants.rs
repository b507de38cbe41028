//! Opt-in structural invariant checks.
//!
//! Two structures in this crate carry invariants worth re-checking after
//! mutation: the dependency graph (downwind and upwind adjacency must
//! mirror each other) and the mesh (the neighbor table must be symmetric
//! and in range). Both implement [`DebugInvariants`] so call sites can
//! assert cheaply in debug builds and keep the checks in release builds
//! via the `check-invariants` feature.

use crate::sweep_error::SweepError;

/// Validation hooks for structures with internal consistency invariants.
pub trait DebugInvariants {
    /// Panic on a broken invariant in debug builds, or in any build when
    /// the `check-invariants` feature is on. No-op otherwise.
    fn debug_assert_invariants(&self);
    /// Run the full check unconditionally, returning the first violation.
    fn validate_invariants(&self) -> Result<(), SweepError>;
}

/// Runs a fallible invariant check and panics with context on failure,
/// compiled in under `debug_assertions` or the `check-invariants` feature.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
