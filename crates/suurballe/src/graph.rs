use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Edge weight. Input graphs must only carry non-negative weights.
pub type Weight = i64;

/// Ordered sequence of nodes from start to end, inclusive.
pub type Path<N> = Vec<N>;

/// Anything that can identify a node: cloneable, totally ordered, printable.
///
/// Ordering is what makes every traversal in this crate deterministic.
pub trait NodeId: Clone + Ord + fmt::Debug {}

impl<T: Clone + Ord + fmt::Debug> NodeId for T {}

/// Directed graph stored as `tail -> (head -> weight)`.
///
/// Every head is also a key of the outer map, so a node without outgoing
/// edges is still present with an empty adjacency. There is at most one edge
/// per ordered pair; adding it again overwrites the weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeightedDigraph<N: Ord> {
    adjacency: BTreeMap<N, BTreeMap<N, Weight>>,
}

impl<N: Ord> Default for WeightedDigraph<N> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }
}

impl<N: NodeId> WeightedDigraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, Weight)>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }

    /// Adds a node without edges. Existing adjacency is left alone.
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Sets `tail -> head` to `weight`, creating either endpoint if needed.
    pub fn add_edge(&mut self, tail: N, head: N, weight: Weight) {
        self.add_node(head.clone());
        self.adjacency.entry(tail).or_default().insert(head, weight);
    }

    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (N, N, Weight)>,
    {
        for (tail, head, weight) in edges {
            self.add_edge(tail, head, weight);
        }
    }

    /// Removes `tail -> head` and returns its weight. Both nodes stay in the
    /// graph even if they lose their last edge.
    pub fn remove_edge(&mut self, tail: &N, head: &N) -> Option<Weight> {
        self.adjacency.get_mut(tail)?.remove(head)
    }

    /// Best-effort batch removal.
    ///
    /// A pair that is not an edge of the graph is logged and skipped; the
    /// rest of the batch is still processed. Returns how many edges were
    /// actually removed.
    pub fn remove_edges<I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut removed = 0;
        for (tail, head) in edges {
            if self.remove_edge(&tail, &head).is_some() {
                removed += 1;
            } else {
                tracing::info!("invalid edge removal: {:?} -> {:?} is not in the graph", tail, head);
            }
        }
        removed
    }

    pub fn weight(&self, tail: &N, head: &N) -> Option<Weight> {
        self.adjacency.get(tail)?.get(head).copied()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn contains_edge(&self, tail: &N, head: &N) -> bool {
        self.weight(tail, head).is_some()
    }

    /// Outgoing edges of `node` as `(head, weight)`, sorted by head. Empty
    /// for unknown nodes.
    pub fn successors(&self, node: &N) -> impl Iterator<Item = (&N, Weight)> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|heads| heads.iter().map(|(head, &weight)| (head, weight)))
    }

    /// All nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    /// All edges as `(tail, head, weight)`, ordered by tail, then head.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, Weight)> {
        self.adjacency.iter().flat_map(|(tail, heads)| {
            heads.iter().map(move |(head, &weight)| (tail, head, weight))
        })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Rebuilds the graph edge by edge, so heads missing from the outer map
/// become nodes.
impl<N: NodeId> From<BTreeMap<N, BTreeMap<N, Weight>>> for WeightedDigraph<N> {
    fn from(adjacency: BTreeMap<N, BTreeMap<N, Weight>>) -> Self {
        let mut graph = Self::new();
        for (tail, heads) in adjacency {
            graph.add_node(tail.clone());
            graph.add_edges(heads.into_iter().map(|(head, weight)| (tail.clone(), head, weight)));
        }
        graph
    }
}

impl<'de, N> Deserialize<'de> for WeightedDigraph<N>
where
    N: NodeId + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<N, BTreeMap<N, Weight>>::deserialize(deserializer).map(Self::from)
    }
}

impl<N: NodeId> FromIterator<(N, N, Weight)> for WeightedDigraph<N> {
    fn from_iter<I: IntoIterator<Item = (N, N, Weight)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<N: NodeId> fmt::Display for WeightedDigraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tail, heads) in &self.adjacency {
            write!(f, "{:?} -> {{", tail)?;
            for (i, (head, weight)) in heads.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:?}: {}", head, weight)?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Consecutive `(n_i, n_{i+1})` pairs of a path.
pub(crate) fn path_edges<N: NodeId>(path: &[N]) -> impl Iterator<Item = (N, N)> + '_ {
    path.windows(2).map(|pair| (pair[0].clone(), pair[1].clone()))
}
