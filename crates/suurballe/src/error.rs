use crate::graph::Weight;
use thiserror::Error;

/// Reasons a disjoint-path search can fail.
///
/// Nodes are carried in their `Debug` rendering so the error type does not
/// depend on the node type of the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuurballeError {
    /// Start or end node is not part of the graph.
    #[error("node {0} is not in the graph")]
    UnknownNode(String),

    /// No path from `from` to `to`.
    #[error("{to} is unreachable from {from}")]
    Unreachable { from: String, to: String },

    /// Reweighting needs a distance for both endpoints of every edge.
    #[error("cannot reweight edge {tail} -> {head}: endpoint unreachable from start")]
    UnreachableEndpoint { tail: String, head: String },

    /// The input graph carries a negative weight.
    #[error("edge {tail} -> {head} has negative weight {weight}")]
    NegativeWeight {
        tail: String,
        head: String,
        weight: Weight,
    },

    /// Reweighting produced a negative reduced cost.
    #[error("reduced cost of edge {tail} -> {head} is negative ({weight})")]
    NegativeReducedCost {
        tail: String,
        head: String,
        weight: Weight,
    },

    /// Weight arithmetic left the range of [`Weight`].
    #[error("weight of edge {tail} -> {head} overflows")]
    WeightOverflow { tail: String, head: String },

    /// A first path exists, but no second path disjoint from it.
    #[error("no two disjoint paths exist")]
    NoDisjointPair,
}

impl SuurballeError {
    pub(crate) fn unknown_node<N: std::fmt::Debug>(node: &N) -> Self {
        Self::UnknownNode(format!("{:?}", node))
    }

    pub(crate) fn weight_overflow<N: std::fmt::Debug>(tail: &N, head: &N) -> Self {
        Self::WeightOverflow {
            tail: format!("{:?}", tail),
            head: format!("{:?}", head),
        }
    }

    pub(crate) fn unreachable<N: std::fmt::Debug>(from: &N, to: &N) -> Self {
        Self::Unreachable {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        }
    }
}
