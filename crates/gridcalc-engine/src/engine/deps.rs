//! Dependency tracking between formula cells.
//!
//! The graph stores both directions of every edge: `precedents` (the cells a
//! formula reads) and `dependents` (the transpose, used for propagation).
//! Replacing a cell's precedents is a single edge-set update.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::cell_ref::CellRef;
use super::tree::ExprNode;

/// Distinct variable names of an expression, in order of first appearance.
pub fn variable_names(root: &ExprNode) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    root.for_each_variable(&mut |name| {
        if seen.insert(name) {
            names.push(name.to_string());
        }
    });
    names
}

/// Directed graph of cell → referenced cell edges, with its transpose.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// Cell → cells it reads from
    precedents: HashMap<CellRef, BTreeSet<CellRef>>,
    /// Cell → cells that read from it
    dependents: HashMap<CellRef, BTreeSet<CellRef>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the precedents of `cell`, unsubscribing from cells no longer
    /// referenced and subscribing to the new ones.
    pub fn set_precedents(&mut self, cell: CellRef, new_precedents: impl IntoIterator<Item = CellRef>) {
        let new_set: BTreeSet<CellRef> = new_precedents.into_iter().collect();
        let old_set = self.precedents.remove(&cell).unwrap_or_default();

        for stale in old_set.difference(&new_set) {
            if let Some(deps) = self.dependents.get_mut(stale) {
                deps.remove(&cell);
                if deps.is_empty() {
                    self.dependents.remove(stale);
                }
            }
        }
        for added in new_set.difference(&old_set) {
            self.dependents.entry(*added).or_default().insert(cell);
        }

        tracing::debug!(
            cell = %cell,
            removed = old_set.difference(&new_set).count(),
            added = new_set.difference(&old_set).count(),
            "updated dependency edges"
        );

        if !new_set.is_empty() {
            self.precedents.insert(cell, new_set);
        }
    }

    /// Remove every outgoing edge of `cell`.
    pub fn clear_precedents(&mut self, cell: CellRef) {
        self.set_precedents(cell, std::iter::empty());
    }

    /// Cells that `cell` reads from, in row-major order.
    pub fn precedents(&self, cell: &CellRef) -> impl Iterator<Item = CellRef> + '_ {
        self.precedents.get(cell).into_iter().flatten().copied()
    }

    /// Cells whose formulas read from `cell`, in row-major order.
    pub fn dependents(&self, cell: &CellRef) -> impl Iterator<Item = CellRef> + '_ {
        self.dependents.get(cell).into_iter().flatten().copied()
    }

    /// Drop every edge.
    pub fn clear(&mut self) {
        self.precedents.clear();
        self.dependents.clear();
    }
}
