//! Checkpoints of the algorithm and the observer that receives them.

use crate::graph::{NodeId, Path, WeightedDigraph};
use serde::Serialize;
use std::fmt;

/// Named checkpoints, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    MainGraph,
    FirstRawPath,
    ReweightedGraph,
    ResidualGraph,
    SecondRawPath,
    CommonEdgesRemoved,
    FinalFirstPath,
    FirstPathRemoved,
    FinalSecondPath,
    FinalGraph,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::MainGraph,
        Stage::FirstRawPath,
        Stage::ReweightedGraph,
        Stage::ResidualGraph,
        Stage::SecondRawPath,
        Stage::CommonEdgesRemoved,
        Stage::FinalFirstPath,
        Stage::FirstPathRemoved,
        Stage::FinalSecondPath,
        Stage::FinalGraph,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::MainGraph => "[step 0] - Main graph",
            Stage::FirstRawPath => "[step 1] - Primary Path 1",
            Stage::ReweightedGraph => "[step 2] - Graph' - Updated weights",
            Stage::ResidualGraph => "[step 3] - G_3 (G - P1) - Updated edges",
            Stage::SecondRawPath => "[step 4] - Primary Path 2 in G_3",
            Stage::CommonEdgesRemoved => "[step 5_1] - G_2 - Without edges P1-common-P2",
            Stage::FinalFirstPath => "[step 5_2] - Final Path 1 in G_2",
            Stage::FirstPathRemoved => "[step 5_3] - G_2 - Without Final P1 edges",
            Stage::FinalSecondPath => "[step 5_4] - Final Path 2 in G_2",
            Stage::FinalGraph => "[step 5_5] - Final G - Both paths (P1 and P2)",
        }
    }

    /// Name usable as a file stem, e.g. `step_5_1_common_edges_removed`.
    pub fn file_stem(self) -> &'static str {
        match self {
            Stage::MainGraph => "step_0_main_graph",
            Stage::FirstRawPath => "step_1_first_raw_path",
            Stage::ReweightedGraph => "step_2_reweighted_graph",
            Stage::ResidualGraph => "step_3_residual_graph",
            Stage::SecondRawPath => "step_4_second_raw_path",
            Stage::CommonEdgesRemoved => "step_5_1_common_edges_removed",
            Stage::FinalFirstPath => "step_5_2_final_first_path",
            Stage::FirstPathRemoved => "step_5_3_first_path_removed",
            Stage::FinalSecondPath => "step_5_4_final_second_path",
            Stage::FinalGraph => "step_5_5_final_graph",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of the state at a checkpoint.
#[derive(Debug)]
pub enum Snapshot<'a, N: Ord> {
    Graph(&'a WeightedDigraph<N>),
    Path(&'a [N]),
}

impl<N: Ord> Clone for Snapshot<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: Ord> Copy for Snapshot<'_, N> {}

impl<N: NodeId> Snapshot<'_, N> {
    pub fn into_owned(self) -> OwnedSnapshot<N> {
        match self {
            Snapshot::Graph(graph) => OwnedSnapshot::Graph(graph.clone()),
            Snapshot::Path(path) => OwnedSnapshot::Path(path.to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OwnedSnapshot<N: Ord> {
    Graph(WeightedDigraph<N>),
    Path(Path<N>),
}

/// Observer called at every [`Stage`].
///
/// The algorithm does not depend on what the sink does with a snapshot.
pub trait StageSink<N: NodeId> {
    fn record(&mut self, stage: Stage, snapshot: Snapshot<'_, N>);
}

impl<N: NodeId, S: StageSink<N> + ?Sized> StageSink<N> for &mut S {
    fn record(&mut self, stage: Stage, snapshot: Snapshot<'_, N>) {
        (**self).record(stage, snapshot);
    }
}

/// Sink that drops every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl<N: NodeId> StageSink<N> for NoopSink {
    fn record(&mut self, _stage: Stage, _snapshot: Snapshot<'_, N>) {}
}

/// Sink that keeps an owned copy of every snapshot.
#[derive(Debug, Clone)]
pub struct RecordingSink<N: Ord> {
    pub records: Vec<(Stage, OwnedSnapshot<N>)>,
}

impl<N: Ord> Default for RecordingSink<N> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<N: NodeId> RecordingSink<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.records.iter().map(|(stage, _)| *stage).collect()
    }

    /// Last snapshot recorded for `stage`.
    pub fn get(&self, stage: Stage) -> Option<&OwnedSnapshot<N>> {
        self.records
            .iter()
            .rev()
            .find(|(recorded, _)| *recorded == stage)
            .map(|(_, snapshot)| snapshot)
    }
}

impl<N: NodeId> StageSink<N> for RecordingSink<N> {
    fn record(&mut self, stage: Stage, snapshot: Snapshot<'_, N>) {
        self.records.push((stage, snapshot.into_owned()));
    }
}
