//! Directed dependency graph over cell identifiers.
//!
//! One graph is built per sweep direction: an edge `parent -> child` means
//! `parent` feeds flux into `child`, so `parent` must be processed first.
//! Each vertex keeps two mirrored adjacency lists (downwind receivers,
//! upwind sources); mutation maintains both sides together.
//!
//! Storage is an arena indexed by cell id. The container owns every vertex,
//! vertices never reference each other by pointer, and the vertex key is the
//! cell index itself. Slots between explicitly added vertices stay vacant and
//! take no part in roots or ordering.
//!
//! Adjacency lists are multisets: adding the same edge twice records it
//! twice, and removal drops one occurrence at a time. Valid classifications
//! never produce duplicates, but standalone users get predictable behavior.

use std::collections::VecDeque;

use crate::debug_invariants::DebugInvariants;
use crate::sweep_error::SweepError;
use crate::topology::cell::CellId;

#[derive(Debug, Clone, Default)]
struct Vertex {
    downwind: Vec<CellId>,
    upwind: Vec<CellId>,
}

/// Mutable directed graph over dense cell identifiers.
///
/// # Example
///
/// ```rust
/// use tri_sweep::topology::cell::CellId;
/// use tri_sweep::topology::graph::DependencyGraph;
///
/// let c = |i| CellId::new(i);
/// let mut g = DependencyGraph::new();
/// g.add_edge(c(0), c(1));
/// g.add_edge(c(0), c(2));
/// g.add_edge(c(1), c(3));
/// g.add_edge(c(2), c(3));
/// assert_eq!(g.roots(), vec![c(0)]);
/// // Destructive sort: the work stack is seeded with the roots and popped
/// // from the back, so sibling order is last-in first-out.
/// assert_eq!(g.order_vertices(), vec![c(0), c(2), c(1), c(3)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    slots: Vec<Option<Vertex>>,
    live: usize,
}

impl DependencyGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with one vertex per cell `0..cells` and no edges.
    ///
    /// This is the shape the sweep builder starts from for every direction.
    pub fn with_cells(cells: usize) -> Self {
        Self {
            slots: (0..cells).map(|_| Some(Vertex::default())).collect(),
            live: cells,
        }
    }

    fn vertex(&self, v: CellId) -> Option<&Vertex> {
        self.slots.get(v.index()).and_then(Option::as_ref)
    }

    fn vertex_mut(&mut self, v: CellId) -> Option<&mut Vertex> {
        self.slots.get_mut(v.index()).and_then(Option::as_mut)
    }

    fn ensure_vertex(&mut self, v: CellId) -> &mut Vertex {
        let idx = v.index();
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        let slot = &mut self.slots[idx];
        if slot.is_none() {
            self.live += 1;
        }
        slot.get_or_insert_with(Vertex::default)
    }

    fn iter_vertices(&self) -> impl Iterator<Item = (CellId, &Vertex)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (CellId::from_index(i), v)))
    }

    /// Number of live vertices.
    pub fn len(&self) -> usize {
        self.live
    }

    /// `true` when the graph holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// `true` when `v` has been added (explicitly or as an edge endpoint).
    pub fn contains(&self, v: CellId) -> bool {
        self.vertex(v).is_some()
    }

    /// Ensure a vertex exists without touching adjacency.
    pub fn add_vertex(&mut self, v: CellId) {
        self.ensure_vertex(v);
    }

    /// Record `child` as downwind of `parent` and `parent` as upwind of
    /// `child`, creating either endpoint if absent.
    pub fn add_edge(&mut self, parent: CellId, child: CellId) {
        self.ensure_vertex(child).upwind.push(parent);
        self.ensure_vertex(parent).downwind.push(child);
    }

    /// Remove one `parent -> child` occurrence from both adjacency lists.
    ///
    /// Returns `false` and leaves the graph untouched when the edge is
    /// absent. Callers that traverse edges they just read (the destructive
    /// sort) assert the return value in debug builds.
    pub fn remove_edge(&mut self, parent: CellId, child: CellId) -> bool {
        let Some(down_pos) = self
            .vertex(parent)
            .and_then(|v| v.downwind.iter().position(|&c| c == child))
        else {
            return false;
        };
        let Some(up_pos) = self
            .vertex(child)
            .and_then(|v| v.upwind.iter().position(|&p| p == parent))
        else {
            return false;
        };
        if let Some(v) = self.vertex_mut(parent) {
            v.downwind.remove(down_pos);
        }
        if let Some(v) = self.vertex_mut(child) {
            v.upwind.remove(up_pos);
        }
        true
    }

    /// `true` when at least one `parent -> child` edge is present.
    pub fn has_edge(&self, parent: CellId, child: CellId) -> bool {
        self.vertex(parent)
            .is_some_and(|v| v.downwind.contains(&child))
    }

    /// Total number of directed edges (counting multiplicity).
    pub fn edge_count(&self) -> usize {
        self.iter_vertices().map(|(_, v)| v.downwind.len()).sum()
    }

    /// Cells receiving flux from `v`, in insertion order.
    pub fn downwind(&self, v: CellId) -> &[CellId] {
        self.vertex(v).map_or(&[], |x| x.downwind.as_slice())
    }

    /// Cells feeding flux into `v`, in insertion order.
    pub fn upwind(&self, v: CellId) -> &[CellId] {
        self.vertex(v).map_or(&[], |x| x.upwind.as_slice())
    }

    /// All vertices with no upwind dependencies, in ascending id order.
    pub fn roots(&self) -> Vec<CellId> {
        self.iter_vertices()
            .filter(|(_, v)| v.upwind.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Discovery order of a breadth-first walk started from all roots at
    /// once, visiting each vertex at most once. Non-destructive.
    ///
    /// Informational only: with several roots this interleaves subtrees
    /// without consuming edges, so it is not in general a valid sweep order.
    /// Vertices unreachable from any root (cyclic or rootless components) do
    /// not appear, so the output can be shorter than [`len`](Self::len).
    pub fn breadth_first_order(&self) -> Vec<CellId> {
        let mut discovered = vec![false; self.slots.len()];
        let mut queue: VecDeque<CellId> = VecDeque::new();
        for root in self.roots() {
            discovered[root.index()] = true;
            queue.push_back(root);
        }
        let mut order = Vec::with_capacity(self.live);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            if let Some(vert) = self.vertex(v) {
                for &child in &vert.downwind {
                    if !discovered[child.index()] {
                        discovered[child.index()] = true;
                        queue.push_back(child);
                    }
                }
            }
        }
        order
    }

    /// Destructive topological sort: the ordering used for sweeps.
    ///
    /// Stack-based Kahn's algorithm. The work stack starts as
    /// [`roots`](Self::roots) and is popped from the back; popping a vertex
    /// appends it to the order, removes each of its current downwind edges,
    /// and pushes any child whose upwind list becomes empty.
    ///
    /// The graph's edges are consumed. If the graph was acyclic the output
    /// holds every vertex exactly once; a cycle leaves its vertices
    /// unordered and the output short, which callers must detect by
    /// comparing lengths. No error is produced here.
    pub fn order_vertices(&mut self) -> Vec<CellId> {
        let mut stack = self.roots();
        let mut order = Vec::with_capacity(self.live);
        while let Some(v) = stack.pop() {
            order.push(v);
            let Some(children) = self.vertex(v).map(|x| x.downwind.clone()) else {
                continue;
            };
            for child in children {
                let removed = self.remove_edge(v, child);
                debug_assert!(removed, "traversed edge {v} -> {child} missing from graph");
                if let Some(cv) = self.vertex(child) {
                    if cv.upwind.is_empty() {
                        stack.push(child);
                    }
                }
            }
        }
        order
    }
}

impl DebugInvariants for DependencyGraph {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "DependencyGraph");
    }

    /// Mirror consistency: every downwind entry has a matching upwind entry
    /// and vice versa, multiplicity included.
    fn validate_invariants(&self) -> Result<(), SweepError> {
        for (id, vert) in self.iter_vertices() {
            for &child in &vert.downwind {
                let down = vert.downwind.iter().filter(|&&c| c == child).count();
                let up = self
                    .vertex(child)
                    .map_or(0, |cv| cv.upwind.iter().filter(|&&p| p == id).count());
                if down != up {
                    return Err(SweepError::InconsistentMirror { parent: id, child });
                }
            }
            for &parent in &vert.upwind {
                let up = vert.upwind.iter().filter(|&&p| p == parent).count();
                let down = self
                    .vertex(parent)
                    .map_or(0, |pv| pv.downwind.iter().filter(|&&c| c == id).count());
                if down != up {
                    return Err(SweepError::InconsistentMirror { parent, child: id });
                }
            }
        }
        Ok(())
    }
}
