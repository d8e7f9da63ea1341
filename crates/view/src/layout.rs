use crate::types::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use suurballe::{NodeId, WeightedDigraph};

impl LayoutConfig {
    /// Places `nodes` and routes `edges` (index pairs into `nodes`).
    pub fn layout(&self, nodes: Vec<Node>, edges: Vec<(usize, usize)>) -> LayoutResult {
        let mut nodes = nodes;

        // Phase 1: Initial placement
        self.initial_placement(&mut nodes, &edges);

        // Phase 2: Force-directed refinement
        self.force_directed(&mut nodes, &edges);

        // Phase 3: Edge routing
        let mut routed_edges = self.route_edges(&nodes, &edges);

        // Phase 4: Calculate canvas and center layout
        let (canvas_width, canvas_height) = self.calculate_canvas_size(&nodes, &routed_edges);
        self.center_layout(&mut nodes, &mut routed_edges, canvas_width, canvas_height);

        LayoutResult {
            nodes,
            edges: routed_edges,
            canvas_width,
            canvas_height,
        }
    }

    /// Lays out a weighted graph, labelling every edge with its weight.
    pub fn layout_graph<N: NodeId + fmt::Display>(&self, graph: &WeightedDigraph<N>) -> LayoutResult {
        let (nodes, edges, labels) = self.graph_parts(graph, true);
        let mut result = self.layout(nodes, edges);
        for (edge, label) in result.edges.iter_mut().zip(labels) {
            edge.label = label;
        }
        result
    }

    /// Lays out a snapshot on top of an existing layout.
    ///
    /// Nodes keep the positions they have in `base` and the canvas keeps its
    /// size, so consecutive snapshots line up. Without a base, or when the
    /// snapshot has a node unknown to it, the snapshot is laid out afresh.
    pub fn arrange(
        &self,
        base: Option<&LayoutResult>,
        ids: Vec<String>,
        edges: Vec<(usize, usize, Option<String>)>,
    ) -> LayoutResult {
        let placed: Option<Vec<Node>> = base.and_then(|base| {
            let positions: BTreeMap<&str, Position> = base
                .nodes
                .iter()
                .map(|node| (node.id.as_str(), node.position))
                .collect();
            ids.iter()
                .map(|id| {
                    positions.get(id.as_str()).map(|&position| Node {
                        id: id.clone(),
                        size: self.node_size(),
                        position,
                    })
                })
                .collect()
        });

        let pairs: Vec<(usize, usize)> = edges.iter().map(|&(s, t, _)| (s, t)).collect();
        let mut result = match (placed, base) {
            (Some(nodes), Some(base)) => {
                let routed = self.route_edges(&nodes, &pairs);
                LayoutResult {
                    nodes,
                    edges: routed,
                    canvas_width: base.canvas_width,
                    canvas_height: base.canvas_height,
                }
            }
            _ => {
                tracing::debug!("no base layout for {} node(s), laying out from scratch", ids.len());
                let nodes = ids.into_iter().map(|id| self.blank_node(id)).collect();
                self.layout(nodes, pairs)
            }
        };

        for (edge, (_, _, label)) in result.edges.iter_mut().zip(edges) {
            edge.label = label;
        }
        result
    }

    /// Node ids, index pairs and optional weight labels for `graph`.
    pub fn graph_parts<N: NodeId + fmt::Display>(
        &self,
        graph: &WeightedDigraph<N>,
        with_weights: bool,
    ) -> (Vec<Node>, Vec<(usize, usize)>, Vec<Option<String>>) {
        let index: BTreeMap<&N, usize> = graph.nodes().enumerate().map(|(i, n)| (n, i)).collect();
        let nodes = graph.nodes().map(|n| self.blank_node(n.to_string())).collect();

        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut labels = Vec::with_capacity(graph.edge_count());
        for (tail, head, weight) in graph.edges() {
            edges.push((index[tail], index[head]));
            labels.push(with_weights.then(|| weight.to_string()));
        }
        (nodes, edges, labels)
    }

    fn node_size(&self) -> Size {
        Size {
            width: self.node_diameter,
            height: self.node_diameter,
        }
    }

    pub fn blank_node(&self, id: String) -> Node {
        Node {
            id,
            size: self.node_size(),
            position: Position { x: 0.0, y: 0.0 },
        }
    }

    fn initial_placement(&self, nodes: &mut [Node], edges: &[(usize, usize)]) {
        // Simple clustering based on connectivity
        let mut clusters: Vec<Vec<usize>> = Vec::new();
        let mut assigned = vec![false; nodes.len()];

        for i in 0..nodes.len() {
            if assigned[i] {
                continue;
            }
            let mut cluster = vec![i];
            assigned[i] = true;

            // Find connected nodes
            for &(a, b) in edges {
                if a == i && !assigned[b] {
                    cluster.push(b);
                    assigned[b] = true;
                } else if b == i && !assigned[a] {
                    cluster.push(a);
                    assigned[a] = true;
                }
            }
            clusters.push(cluster);
        }

        // Place clusters column by column, staggered so no two columns line up
        let mut x_offset = 0.0;
        for (column, cluster) in clusters.into_iter().enumerate() {
            let mut y_offset = if column % 2 == 0 { 0.0 } else { self.min_spacing / 2.0 };
            for &node_idx in &cluster {
                nodes[node_idx].position = Position {
                    x: x_offset,
                    y: y_offset,
                };
                y_offset += nodes[node_idx].size.height + self.min_spacing;
            }
            x_offset += self.node_diameter + self.min_spacing;
        }
    }

    fn force_directed(&self, nodes: &mut [Node], edges: &[(usize, usize)]) {
        for _ in 0..self.iterations {
            let mut forces: Vec<Position> = vec![Position { x: 0.0, y: 0.0 }; nodes.len()];

            // Calculate repulsion
            for i in 0..nodes.len() {
                for j in (i + 1)..nodes.len() {
                    let a = nodes[i].center();
                    let b = nodes[j].center();
                    let dx = b.x - a.x;
                    let dy = b.y - a.y;
                    let min_dist = nodes[i].size.width / 2.0 + nodes[j].size.width / 2.0 + self.min_spacing;
                    let dist = (dx * dx + dy * dy).sqrt();
                    if dist < min_dist {
                        let force = self.repulsion_strength * (min_dist - dist) / min_dist;
                        let fx = force * dx / dist.max(1.0);
                        let fy = force * dy / dist.max(1.0);

                        forces[i].x -= fx;
                        forces[i].y -= fy;
                        forces[j].x += fx;
                        forces[j].y += fy;
                    }
                }
            }

            // Calculate attraction
            for &(a, b) in edges {
                if a == b {
                    continue;
                }
                let dx = nodes[b].position.x - nodes[a].position.x;
                let dy = nodes[b].position.y - nodes[a].position.y;
                let dist = (dx * dx + dy * dy).sqrt().max(1.0);
                let force = self.attraction_strength * dist;

                let fx = force * dx / dist;
                let fy = force * dy / dist;

                forces[a].x += fx;
                forces[a].y += fy;
                forces[b].x -= fx;
                forces[b].y -= fy;
            }

            // Apply forces
            for (node, force) in nodes.iter_mut().zip(&forces) {
                node.position.x += force.x * 0.1;
                node.position.y += force.y * 0.1;
            }
        }
    }

    /// Straight edges from border to border. Edges that have an antiparallel
    /// twin are shifted sideways so the two stay distinguishable.
    fn route_edges(&self, nodes: &[Node], edges: &[(usize, usize)]) -> Vec<Edge> {
        let present: BTreeSet<(usize, usize)> = edges.iter().copied().collect();

        edges
            .iter()
            .map(|&(source, target)| {
                let path = if source == target {
                    self.self_loop(&nodes[source])
                } else {
                    let offset = if present.contains(&(target, source)) {
                        self.edge_separation
                    } else {
                        0.0
                    };
                    self.straight(&nodes[source], &nodes[target], offset)
                };
                Edge {
                    source,
                    target,
                    path,
                    label: None,
                }
            })
            .collect()
    }

    fn straight(&self, from: &Node, to: &Node, offset: f64) -> Vec<Position> {
        let a = from.center();
        let b = to.center();
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len = (dx * dx + dy * dy).sqrt().max(1.0);
        let (ux, uy) = (dx / len, dy / len);
        // Left-hand normal of the edge direction
        let (nx, ny) = (uy * offset, -ux * offset);

        let r_from = from.size.width / 2.0;
        let r_to = to.size.width / 2.0;
        vec![
            Position {
                x: a.x + ux * r_from + nx,
                y: a.y + uy * r_from + ny,
            },
            Position {
                x: b.x - ux * r_to + nx,
                y: b.y - uy * r_to + ny,
            },
        ]
    }

    fn self_loop(&self, node: &Node) -> Vec<Position> {
        let c = node.center();
        let r = node.size.width / 2.0;
        vec![
            Position { x: c.x - r / 2.0, y: c.y - r },
            Position { x: c.x - r / 2.0, y: c.y - 2.0 * r },
            Position { x: c.x + r / 2.0, y: c.y - 2.0 * r },
            Position { x: c.x + r / 2.0, y: c.y - r },
        ]
    }

    fn calculate_canvas_size(&self, nodes: &[Node], edges: &[Edge]) -> (f64, f64) {
        let (min_x, max_x, min_y, max_y) = bounds(nodes, edges);

        let width = (max_x - min_x).max(400.0) + 2.0 * self.min_spacing;
        let height = (max_y - min_y).max(300.0) + 2.0 * self.min_spacing;

        (width, height)
    }

    fn center_layout(
        &self,
        nodes: &mut [Node],
        edges: &mut [Edge],
        canvas_width: f64,
        canvas_height: f64,
    ) {
        let (min_x, max_x, min_y, max_y) = bounds(nodes, edges);

        let layout_width = max_x - min_x;
        let layout_height = max_y - min_y;
        let offset_x = (canvas_width - layout_width) / 2.0 - min_x;
        let offset_y = (canvas_height - layout_height) / 2.0 - min_y;

        for node in nodes.iter_mut() {
            node.position.x += offset_x;
            node.position.y += offset_y;
        }

        for edge in edges.iter_mut() {
            for point in &mut edge.path {
                point.x += offset_x;
                point.y += offset_y;
            }
        }
    }
}

/// `(min_x, max_x, min_y, max_y)` over node boxes and edge waypoints. All
/// zero for an empty layout.
fn bounds(nodes: &[Node], edges: &[Edge]) -> (f64, f64, f64, f64) {
    if nodes.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for node in nodes {
        min_x = min_x.min(node.position.x);
        max_x = max_x.max(node.position.x + node.size.width);
        min_y = min_y.min(node.position.y);
        max_y = max_y.max(node.position.y + node.size.height);
    }

    for edge in edges {
        for point in &edge.path {
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(point.y);
            max_y = max_y.max(point.y);
        }
    }

    (min_x, max_x, min_y, max_y)
}
