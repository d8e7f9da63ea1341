//! Single-source shortest paths.

use crate::error::SuurballeError;
use crate::graph::{NodeId, Path, Weight, WeightedDigraph};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Distance of every reached node from the source. Missing means unreached.
pub type DistanceTable<N> = BTreeMap<N, Weight>;

/// Predecessor of every reached node on the shortest-path tree. The source
/// has no entry.
pub type PredecessorMap<N> = BTreeMap<N, N>;

/// Result of a full Dijkstra run from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree<N: Ord> {
    source: N,
    distances: DistanceTable<N>,
    predecessors: PredecessorMap<N>,
}

impl<N: NodeId> ShortestPathTree<N> {
    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn distance(&self, node: &N) -> Option<Weight> {
        self.distances.get(node).copied()
    }

    pub fn distances(&self) -> &DistanceTable<N> {
        &self.distances
    }

    pub fn predecessors(&self) -> &PredecessorMap<N> {
        &self.predecessors
    }

    pub fn into_distances(self) -> DistanceTable<N> {
        self.distances
    }

    /// Walks the predecessor chain back from `end` to the source.
    ///
    /// Returns `None` if `end` was never reached. For `end == source` the
    /// path is the single node `[source]`.
    pub fn path_to(&self, end: &N) -> Option<Path<N>> {
        if !self.distances.contains_key(end) {
            return None;
        }

        let mut path = vec![end.clone()];
        let mut current = end;
        while *current != self.source {
            current = self.predecessors.get(current)?;
            path.push(current.clone());
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra from `start` over the whole reachable part of `graph`.
///
/// Weights must be non-negative. A predecessor is only replaced on a strict
/// improvement and equal distances are settled in node order, so the tree is
/// fully determined by the graph. An unknown `start` yields an empty tree.
/// A distance beyond `Weight::MAX` counts as unreachable.
pub fn dijkstra<N: NodeId>(graph: &WeightedDigraph<N>, start: &N) -> ShortestPathTree<N> {
    let mut distances = DistanceTable::new();
    let mut predecessors = PredecessorMap::new();
    let mut settled = BTreeSet::new();
    let mut queue: BinaryHeap<Reverse<(Weight, N)>> = BinaryHeap::new();

    if graph.contains_node(start) {
        distances.insert(start.clone(), 0);
        queue.push(Reverse((0, start.clone())));
    }

    while let Some(Reverse((dist_u, u))) = queue.pop() {
        // Stale entry, `u` was already settled with a smaller distance.
        if !settled.insert(u.clone()) {
            continue;
        }

        for (v, weight) in graph.successors(&u) {
            let Some(candidate) = dist_u.checked_add(weight) else {
                tracing::debug!("distance to {:?} via {:?} overflows, skipped", v, u);
                continue;
            };
            if distances.get(v).is_none_or(|&known| candidate < known) {
                distances.insert(v.clone(), candidate);
                predecessors.insert(v.clone(), u.clone());
                queue.push(Reverse((candidate, v.clone())));
            }
        }
    }

    ShortestPathTree {
        source: start.clone(),
        distances,
        predecessors,
    }
}

/// Shortest path from `start` to `end` plus the distance table of the run.
///
/// `start == end` is a valid zero-length path `[start]`, not a failure.
pub fn shortest_path<N: NodeId>(
    graph: &WeightedDigraph<N>,
    start: &N,
    end: &N,
) -> Result<(Path<N>, DistanceTable<N>), SuurballeError> {
    for node in [start, end] {
        if !graph.contains_node(node) {
            return Err(SuurballeError::unknown_node(node));
        }
    }

    let tree = dijkstra(graph, start);
    let path = tree
        .path_to(end)
        .ok_or_else(|| SuurballeError::unreachable(start, end))?;
    Ok((path, tree.into_distances()))
}

/// Like [`shortest_path`], but reports failure as an empty path and an empty
/// distance table. An empty path always means "no path found".
pub fn shortest_path_or_empty<N: NodeId>(
    graph: &WeightedDigraph<N>,
    start: &N,
    end: &N,
) -> (Path<N>, DistanceTable<N>) {
    match shortest_path(graph, start, end) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!("shortest path search failed: {}", err);
            (Vec::new(), DistanceTable::new())
        }
    }
}

/// Sum of the edge weights along `path`, or `None` if a hop is not an edge
/// or the sum overflows.
pub(crate) fn path_weight<N: NodeId>(graph: &WeightedDigraph<N>, path: &[N]) -> Option<Weight> {
    path.windows(2)
        .try_fold(0 as Weight, |total, pair| total.checked_add(graph.weight(&pair[0], &pair[1])?))
}
