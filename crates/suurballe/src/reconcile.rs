//! Turning the two raw paths into a genuinely disjoint pair.
//!
//! The second raw path may walk backwards over reversed edges of the first.
//! Such a segment is used by neither final path: it is cut out of the
//! original graph in both directions, and the two final paths are searched
//! one after the other on what remains.

use crate::dijkstra::{DistanceTable, shortest_path};
use crate::error::SuurballeError;
use crate::graph::{NodeId, Path, Weight, WeightedDigraph, path_edges};
use crate::residual::{forward_edges, reversed_edges};
use crate::stage::{Snapshot, Stage, StageSink};
use serde::Serialize;
use std::collections::BTreeSet;

/// A path with the weight of each hop, in original units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedPath<N> {
    pub nodes: Path<N>,
    /// `weights[i]` is the weight of `nodes[i] -> nodes[i + 1]`.
    pub weights: Vec<Weight>,
}

impl<N: NodeId> WeightedPath<N> {
    /// Recovers hop weights as consecutive distance differences,
    /// `d(n_{i+1}) - d(n_i)`. `None` if a node has no distance.
    pub fn from_distances(nodes: Path<N>, distances: &DistanceTable<N>) -> Option<Self> {
        let weights = nodes
            .windows(2)
            .map(|pair| Some(distances.get(&pair[1])? - distances.get(&pair[0])?))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { nodes, weights })
    }

    /// Sum of the hop weights, saturating at `Weight::MAX`.
    pub fn cost(&self) -> Weight {
        self.weights.iter().fold(0, |total: Weight, &weight| total.saturating_add(weight))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hops as `(tail, head, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (N, N, Weight)> + '_ {
        path_edges(&self.nodes)
            .zip(self.weights.iter().copied())
            .map(|((tail, head), weight)| (tail, head, weight))
    }
}

/// The final pair of paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisjointPaths<N> {
    pub first: WeightedPath<N>,
    pub second: WeightedPath<N>,
}

impl<N: NodeId> DisjointPaths<N> {
    pub fn total_cost(&self) -> Weight {
        self.first.cost().saturating_add(self.second.cost())
    }

    pub fn into_paths(self) -> (Path<N>, Path<N>) {
        (self.first.nodes, self.second.nodes)
    }

    /// Graph made of the edges of both paths.
    pub fn to_graph(&self) -> WeightedDigraph<N> {
        self.first.edges().chain(self.second.edges()).collect()
    }
}

/// Edges the two raw paths share as a reversed segment, in both directions.
///
/// This is `reversed(first) ∩ forward(second)`: the second path traversed a
/// zero-cost reversal of a first-path edge. Each hit is expanded to `(u, v)`
/// and `(v, u)` so the segment is dropped whichever way it exists.
pub fn common_edges<N: NodeId>(first_raw: &[N], second_raw: &[N]) -> BTreeSet<(N, N)> {
    let reversed_first = reversed_edges(first_raw);
    let traversed_second = forward_edges(second_raw);

    reversed_first
        .intersection(&traversed_second)
        .flat_map(|(tail, head)| {
            [
                (tail.clone(), head.clone()),
                (head.clone(), tail.clone()),
            ]
        })
        .collect()
}

/// Computes the final disjoint pair from the two raw paths.
///
/// Works on a fresh clone of `original` (untransformed weights). The first
/// final path is the shortest path once the common edges are gone; the second
/// is the shortest path once the first one's edges are gone as well, in both
/// directions. Either search failing means there is no disjoint pair.
pub fn reconcile<N, S>(
    original: &WeightedDigraph<N>,
    first_raw: &[N],
    second_raw: &[N],
    start: &N,
    end: &N,
    sink: &mut S,
) -> Result<DisjointPaths<N>, SuurballeError>
where
    N: NodeId,
    S: StageSink<N> + ?Sized,
{
    let common = common_edges(first_raw, second_raw);
    tracing::debug!("{} common edge orientations between the raw paths", common.len());

    let mut cleaned = original.clone();
    let removed = cleaned.remove_edges(common);
    tracing::debug!("removed {} common edges from the original graph", removed);
    sink.record(Stage::CommonEdgesRemoved, Snapshot::Graph(&cleaned));

    let (first, first_distances) = search(&cleaned, start, end)?;
    sink.record(Stage::FinalFirstPath, Snapshot::Path(&first));

    let first_both_ways: BTreeSet<(N, N)> = forward_edges(&first)
        .into_iter()
        .chain(reversed_edges(&first))
        .collect();
    cleaned.remove_edges(first_both_ways);
    sink.record(Stage::FirstPathRemoved, Snapshot::Graph(&cleaned));

    let (second, second_distances) = search(&cleaned, start, end)?;
    sink.record(Stage::FinalSecondPath, Snapshot::Path(&second));

    let paths = DisjointPaths {
        first: WeightedPath::from_distances(first, &first_distances)
            .ok_or(SuurballeError::NoDisjointPair)?,
        second: WeightedPath::from_distances(second, &second_distances)
            .ok_or(SuurballeError::NoDisjointPair)?,
    };
    let final_graph = paths.to_graph();
    sink.record(Stage::FinalGraph, Snapshot::Graph(&final_graph));

    Ok(paths)
}

fn search<N: NodeId>(
    graph: &WeightedDigraph<N>,
    start: &N,
    end: &N,
) -> Result<(Path<N>, DistanceTable<N>), SuurballeError> {
    shortest_path(graph, start, end).map_err(|err| {
        tracing::debug!("reconciliation search failed: {}", err);
        SuurballeError::NoDisjointPair
    })
}
