//! Circular dependency detection for formula cells.
//!
//! When a formula is entered, we must verify it doesn't create a cycle
//! (e.g., A1 references B1, B1 references C1, C1 references A1).
//! The check runs against the *candidate* references of the new formula
//! while the live graph still holds the old edges, so nothing has to be
//! rolled back when a cycle is found.

use std::collections::HashSet;

use super::{CellRef, DependencyGraph};

/// Detect whether giving `start` the references in `candidate` would close a
/// cycle in `graph`.
/// Returns Some(cycle_path) starting and ending at `start` if so, None otherwise.
pub fn detect_cycle(
    start: &CellRef,
    candidate: &[CellRef],
    graph: &DependencyGraph,
) -> Option<Vec<CellRef>> {
    let mut visiting = HashSet::new();
    let mut cleared = HashSet::new();
    let mut path = vec![*start];

    visiting.insert(*start);
    for next in candidate {
        if detect_cycle_dfs(start, next, graph, &mut visiting, &mut cleared, &mut path) {
            return Some(path);
        }
    }
    None
}

fn detect_cycle_dfs(
    start: &CellRef,
    current: &CellRef,
    graph: &DependencyGraph,
    visiting: &mut HashSet<CellRef>,
    cleared: &mut HashSet<CellRef>,
    path: &mut Vec<CellRef>,
) -> bool {
    if current == start {
        path.push(*current);
        return true;
    }
    // Already on the current path, or fully explored without reaching start.
    if visiting.contains(current) || cleared.contains(current) {
        return false;
    }

    visiting.insert(*current);
    path.push(*current);

    // The live edges of `start` are about to be replaced, so they are never
    // followed: `start` is only ever reached as a target above.
    let next: Vec<CellRef> = graph.precedents(current).collect();
    for dep in &next {
        if detect_cycle_dfs(start, dep, graph, visiting, cleared, path) {
            return true;
        }
    }

    path.pop();
    visiting.remove(current);
    cleared.insert(*current);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_detect_cycle_no_cycle() {
        let mut graph = DependencyGraph::new();
        graph.set_precedents(cell("B1"), [cell("A1")]);

        assert!(detect_cycle(&cell("C1"), &[cell("A1"), cell("B1")], &graph).is_none());
    }

    #[test]
    fn test_detect_cycle_direct() {
        let mut graph = DependencyGraph::new();
        graph.set_precedents(cell("B1"), [cell("A1")]);

        let path = detect_cycle(&cell("A1"), &[cell("B1")], &graph).unwrap();
        assert_eq!(path, vec![cell("A1"), cell("B1"), cell("A1")]);
    }

    #[test]
    fn test_detect_cycle_indirect() {
        let mut graph = DependencyGraph::new();
        graph.set_precedents(cell("A1"), [cell("A2")]);
        graph.set_precedents(cell("A2"), [cell("A3")]);

        let path = detect_cycle(&cell("A3"), &[cell("A1")], &graph).unwrap();
        assert_eq!(path, vec![cell("A3"), cell("A1"), cell("A2"), cell("A3")]);
    }

    #[test]
    fn test_detect_cycle_self_reference() {
        let graph = DependencyGraph::new();
        assert!(detect_cycle(&cell("A1"), &[cell("A1")], &graph).is_some());
    }

    #[test]
    fn test_old_edges_of_start_are_ignored() {
        // B1 currently reads A1; replacing B1's formula with one that reads C1
        // must not be confused by the stale B1 -> A1 edge.
        let mut graph = DependencyGraph::new();
        graph.set_precedents(cell("B1"), [cell("A1")]);
        graph.set_precedents(cell("A1"), [cell("C1")]);

        assert!(detect_cycle(&cell("B1"), &[cell("C1")], &graph).is_none());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut graph = DependencyGraph::new();
        graph.set_precedents(cell("B1"), [cell("A1")]);
        graph.set_precedents(cell("C1"), [cell("A1")]);
        graph.set_precedents(cell("D1"), [cell("B1"), cell("C1")]);

        assert!(detect_cycle(&cell("E1"), &[cell("D1"), cell("B1")], &graph).is_none());
    }
}
