//! Suurballe's algorithm for two disjoint shortest paths.
//!
//! Given a directed graph with non-negative edge weights and a pair of
//! endpoints, [`find_2disjoint_path`] returns two paths from `start` to `end`
//! that share no edge in either direction and whose summed weight is small.
//!
//! The algorithm runs in five phases, each in its own module:
//!
//! 1. [`dijkstra`]: first shortest path and the distance table from `start`.
//! 2. [`reweight`]: reduced costs `w(u,v) - d(v) + d(u)`.
//! 3. [`residual`]: first path excised and reversed at zero cost.
//! 4. second shortest path on the residual graph.
//! 5. [`reconcile`]: shared segments dropped, both paths recomputed on the
//!    original weights.
//!
//! Every phase works on its own clone of the graph, so snapshots handed to a
//! [`StageSink`] stay valid after later phases run.

pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod reconcile;
pub mod residual;
pub mod reweight;
pub mod stage;
mod suurballe;

pub use dijkstra::{
    DistanceTable, PredecessorMap, ShortestPathTree, dijkstra, shortest_path,
    shortest_path_or_empty,
};
pub use error::SuurballeError;
pub use graph::{NodeId, Path, Weight, WeightedDigraph};
pub use reconcile::{DisjointPaths, WeightedPath};
pub use stage::{NoopSink, OwnedSnapshot, RecordingSink, Snapshot, Stage, StageSink};
pub use suurballe::{find_2disjoint_path, find_2disjoint_path_with, try_find_2disjoint_path};
