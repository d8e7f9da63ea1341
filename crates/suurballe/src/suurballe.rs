use crate::dijkstra::{path_weight, shortest_path};
use crate::error::SuurballeError;
use crate::graph::{NodeId, Path, Weight, WeightedDigraph};
use crate::reconcile::{DisjointPaths, WeightedPath, reconcile};
use crate::residual::residual;
use crate::reweight::reweight;
use crate::stage::{NoopSink, Snapshot, Stage, StageSink};

/// Two disjoint paths from `start` to `end`, or two empty paths if there are
/// none. The reason for a failure is logged.
pub fn find_2disjoint_path<N: NodeId>(
    graph: &WeightedDigraph<N>,
    start: &N,
    end: &N,
) -> (Path<N>, Path<N>) {
    find_2disjoint_path_with(graph, start, end, &mut NoopSink)
}

/// [`find_2disjoint_path`] reporting every stage to `sink`.
pub fn find_2disjoint_path_with<N, S>(
    graph: &WeightedDigraph<N>,
    start: &N,
    end: &N,
    sink: &mut S,
) -> (Path<N>, Path<N>)
where
    N: NodeId,
    S: StageSink<N> + ?Sized,
{
    match try_find_2disjoint_path(graph, start, end, sink) {
        Ok(paths) => paths.into_paths(),
        Err(err) => {
            tracing::warn!("no disjoint paths from {:?} to {:?}: {}", start, end, err);
            (Vec::new(), Vec::new())
        }
    }
}

/// Suurballe's algorithm with a typed outcome.
///
/// `graph` is only read; every phase works on its own clone. `start == end`
/// yields the trivial pair `([start], [start])`.
pub fn try_find_2disjoint_path<N, S>(
    graph: &WeightedDigraph<N>,
    start: &N,
    end: &N,
    sink: &mut S,
) -> Result<DisjointPaths<N>, SuurballeError>
where
    N: NodeId,
    S: StageSink<N> + ?Sized,
{
    validate(graph, start, end)?;
    sink.record(Stage::MainGraph, Snapshot::Graph(graph));

    if start == end {
        tracing::info!("start and end are both {:?}, returning the trivial pair", start);
        let trivial = WeightedPath {
            nodes: vec![start.clone()],
            weights: Vec::new(),
        };
        return Ok(DisjointPaths {
            first: trivial.clone(),
            second: trivial,
        });
    }

    let (first_raw, distances) = shortest_path(graph, start, end)?;
    tracing::debug!("first raw path: {:?}", first_raw);
    sink.record(Stage::FirstRawPath, Snapshot::Path(&first_raw));

    let reweighted = reweight(graph, &distances)?;
    sink.record(Stage::ReweightedGraph, Snapshot::Graph(&reweighted));

    let residual = residual(&reweighted, &first_raw);
    sink.record(Stage::ResidualGraph, Snapshot::Graph(&residual));

    let (second_raw, _) = shortest_path(&residual, start, end).map_err(|err| {
        tracing::debug!("no second path in the residual graph: {}", err);
        SuurballeError::NoDisjointPair
    })?;
    tracing::debug!(
        "second raw path: {:?} (reduced cost {:?})",
        second_raw,
        path_weight(&residual, &second_raw)
    );
    sink.record(Stage::SecondRawPath, Snapshot::Path(&second_raw));

    let paths = reconcile(graph, &first_raw, &second_raw, start, end, sink)?;
    tracing::info!(
        "disjoint paths {:?} (cost {}) and {:?} (cost {})",
        paths.first.nodes,
        paths.first.cost(),
        paths.second.nodes,
        paths.second.cost()
    );
    Ok(paths)
}

fn validate<N: NodeId>(graph: &WeightedDigraph<N>, start: &N, end: &N) -> Result<(), SuurballeError> {
    for node in [start, end] {
        if !graph.contains_node(node) {
            return Err(SuurballeError::unknown_node(node));
        }
    }

    if let Some((tail, head, weight)) = graph.edges().find(|&(_, _, weight)| weight < 0) {
        return Err(SuurballeError::NegativeWeight {
            tail: format!("{:?}", tail),
            head: format!("{:?}", head),
            weight,
        });
    }

    // Distances and path costs never exceed the total weight.
    let mut total: Weight = 0;
    for (tail, head, weight) in graph.edges() {
        total = total
            .checked_add(weight)
            .ok_or_else(|| SuurballeError::weight_overflow(tail, head))?;
    }

    Ok(())
}
