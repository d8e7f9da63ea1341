//! Residual graph for the second search.

use crate::graph::{NodeId, WeightedDigraph, path_edges};
use std::collections::BTreeSet;

/// Edges of `path` in reverse orientation, `{(n_{i+1}, n_i)}`.
pub fn reversed_edges<N: NodeId>(path: &[N]) -> BTreeSet<(N, N)> {
    path_edges(path).map(|(tail, head)| (head, tail)).collect()
}

/// Edges of `path` as traversed, `{(n_i, n_{i+1})}`.
pub fn forward_edges<N: NodeId>(path: &[N]) -> BTreeSet<(N, N)> {
    path_edges(path).collect()
}

/// Builds the residual graph from the reweighted graph and the first path.
///
/// Every edge along `first_path` is removed in both directions, then each
/// path edge is put back reversed with weight 0. That weight is exact because
/// path edges have reduced cost 0. `reweighted` is cloned, never modified.
pub fn residual<N: NodeId>(reweighted: &WeightedDigraph<N>, first_path: &[N]) -> WeightedDigraph<N> {
    let mut residual = reweighted.clone();

    let reversed = reversed_edges(first_path);
    let both_ways: BTreeSet<(N, N)> = forward_edges(first_path)
        .into_iter()
        .chain(reversed.iter().cloned())
        .collect();

    let removed = residual.remove_edges(both_ways);
    tracing::debug!(
        "residual graph: removed {} edges along the first path, reversing {}",
        removed,
        reversed.len()
    );

    residual.add_edges(reversed.into_iter().map(|(tail, head)| (tail, head, 0)));
    residual
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_and_forward_edges() {
        let path = ["A", "B", "C"];

        assert_eq!(
            reversed_edges(&path),
            BTreeSet::from([("B", "A"), ("C", "B")])
        );
        assert_eq!(
            forward_edges(&path),
            BTreeSet::from([("A", "B"), ("B", "C")])
        );
        assert!(reversed_edges(&["A"]).is_empty());
    }

    #[test]
    fn test_residual_reverses_path() {
        let reweighted = WeightedDigraph::from_edges([
            ("A", "B", 0),
            ("B", "C", 0),
            ("C", "B", 3),
            ("A", "C", 2),
        ]);

        let residual = residual(&reweighted, &["A", "B", "C"]);

        assert!(!residual.contains_edge(&"A", &"B"));
        assert!(!residual.contains_edge(&"B", &"C"));
        assert_eq!(residual.weight(&"B", &"A"), Some(0));
        // The antiparallel C -> B is replaced by the zero-cost reversal.
        assert_eq!(residual.weight(&"C", &"B"), Some(0));
        assert_eq!(residual.weight(&"A", &"C"), Some(2));
        assert_eq!(residual.edge_count(), 3);
    }

    #[test]
    fn test_residual_leaves_input() {
        let reweighted = WeightedDigraph::from_edges([("A", "B", 0)]);

        let _ = residual(&reweighted, &["A", "B"]);

        assert_eq!(reweighted.weight(&"A", &"B"), Some(0));
        assert!(!reweighted.contains_edge(&"B", &"A"));
    }
}
