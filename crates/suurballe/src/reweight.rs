//! Reduced-cost transform.
//!
//! With `d(x)` the shortest distance from the start node, every edge gets
//! `w'(u, v) = w(u, v) - d(v) + d(u)`. Reduced costs are non-negative, edges
//! on any shortest path from the start cost exactly 0, and every path between
//! a fixed pair of nodes shifts by the same constant, so shortest paths stay
//! shortest.

use crate::dijkstra::DistanceTable;
use crate::error::SuurballeError;
use crate::graph::{NodeId, WeightedDigraph};

/// Returns a reweighted copy of `graph`. `graph` itself is not touched.
///
/// Every edge endpoint must have an entry in `distances`; an edge leaving a
/// node that is unreachable from the start has no defined reduced cost and
/// fails the whole transform, as does a reduced cost outside the range of
/// [`Weight`].
pub fn reweight<N: NodeId>(
    graph: &WeightedDigraph<N>,
    distances: &DistanceTable<N>,
) -> Result<WeightedDigraph<N>, SuurballeError> {
    let mut reweighted = graph.clone();

    for (tail, head, weight) in graph.edges() {
        let (Some(d_tail), Some(d_head)) = (distances.get(tail), distances.get(head)) else {
            return Err(SuurballeError::UnreachableEndpoint {
                tail: format!("{:?}", tail),
                head: format!("{:?}", head),
            });
        };

        let reduced = weight
            .checked_add(*d_tail)
            .and_then(|raised| raised.checked_sub(*d_head))
            .ok_or_else(|| SuurballeError::weight_overflow(tail, head))?;
        if reduced < 0 {
            return Err(SuurballeError::NegativeReducedCost {
                tail: format!("{:?}", tail),
                head: format!("{:?}", head),
                weight: reduced,
            });
        }
        reweighted.add_edge(tail.clone(), head.clone(), reduced);
    }

    Ok(reweighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::{dijkstra, shortest_path};
    use crate::graph::{Weight, path_edges};

    fn graph() -> WeightedDigraph<&'static str> {
        WeightedDigraph::from_edges([
            ("A", "B", 1),
            ("A", "C", 3),
            ("B", "C", 1),
            ("B", "D", 4),
            ("C", "D", 1),
            ("D", "B", 2),
        ])
    }

    #[test]
    fn test_first_path_edges_cost_zero() {
        let graph = graph();
        let (path, distances) = shortest_path(&graph, &"A", &"D").unwrap();

        let reweighted = reweight(&graph, &distances).unwrap();

        for (tail, head) in path_edges(&path) {
            assert_eq!(reweighted.weight(&tail, &head), Some(0));
        }
    }

    #[test]
    fn test_reduced_costs() {
        let graph = graph();
        let distances = dijkstra(&graph, &"A").into_distances();

        let reweighted = reweight(&graph, &distances).unwrap();

        // d = {A: 0, B: 1, C: 2, D: 3}
        assert_eq!(reweighted.weight(&"A", &"C"), Some(1));
        assert_eq!(reweighted.weight(&"B", &"D"), Some(2));
        assert_eq!(reweighted.weight(&"D", &"B"), Some(4));
        assert!(reweighted.edges().all(|(_, _, w)| w >= 0));
    }

    #[test]
    fn test_input_untouched() {
        let graph = graph();
        let before = graph.clone();
        let distances = dijkstra(&graph, &"A").into_distances();

        let _ = reweight(&graph, &distances).unwrap();

        assert_eq!(graph, before);
    }

    #[test]
    fn test_unreachable_tail_fails() {
        let mut graph = graph();
        graph.add_edge("X", "A", 1);
        let distances = dijkstra(&graph, &"A").into_distances();

        let err = reweight(&graph, &distances).unwrap_err();

        assert_eq!(
            err,
            SuurballeError::UnreachableEndpoint {
                tail: "\"X\"".to_string(),
                head: "\"A\"".to_string(),
            }
        );
    }

    #[test]
    fn test_inconsistent_distances_fail() {
        let graph = graph();
        let mut distances = dijkstra(&graph, &"A").into_distances();
        distances.insert("D", 100);

        let err = reweight(&graph, &distances).unwrap_err();

        assert!(matches!(err, SuurballeError::NegativeReducedCost { .. }));
    }

    #[test]
    fn test_reduced_cost_overflow_fails() {
        let graph = WeightedDigraph::from_edges([("A", "B", Weight::MAX), ("A", "C", 1), ("C", "B", 1)]);
        let mut distances = dijkstra(&graph, &"A").into_distances();
        // A potential larger than any real distance pushes `w + d(A)` out of range.
        distances.insert("A", 1);

        let err = reweight(&graph, &distances).unwrap_err();

        assert_eq!(
            err,
            SuurballeError::WeightOverflow {
                tail: "\"A\"".to_string(),
                head: "\"B\"".to_string(),
            }
        );
    }
}
