use petgraph::graph::{DiGraph, NodeIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap};
use suurballe::*;
use tracing_test::traced_test;

fn graph_of(edges: &[(&'static str, &'static str, Weight)]) -> WeightedDigraph<&'static str> {
    edges.iter().copied().collect()
}

/// Two routes of cost 5 hidden behind a cheaper path of cost 3 that blocks
/// both of them.
fn two_routes() -> WeightedDigraph<&'static str> {
    graph_of(&[
        ("A", "B", 1),
        ("B", "E", 1),
        ("E", "F", 1),
        ("A", "C", 2),
        ("C", "E", 2),
        ("B", "D", 2),
        ("D", "F", 2),
    ])
}

fn undirected_edges<N: NodeId>(path: &[N]) -> BTreeSet<(N, N)> {
    path.windows(2)
        .map(|pair| {
            let (a, b) = (pair[0].clone(), pair[1].clone());
            if a <= b { (a, b) } else { (b, a) }
        })
        .collect()
}

fn is_simple<N: NodeId>(path: &[N]) -> bool {
    path.iter().collect::<BTreeSet<_>>().len() == path.len()
}

#[test]
fn test_two_routes_optimal_pair() {
    let graph = two_routes();

    let paths = try_find_2disjoint_path(&graph, &"A", &"F", &mut NoopSink).unwrap();

    assert_eq!(paths.first.nodes, vec!["A", "B", "D", "F"]);
    assert_eq!(paths.first.weights, vec![1, 2, 2]);
    assert_eq!(paths.second.nodes, vec!["A", "C", "E", "F"]);
    assert_eq!(paths.second.weights, vec![2, 2, 1]);
    assert_eq!(paths.total_cost(), 10);
}

#[test]
fn test_intermediate_snapshots() {
    let graph = two_routes();
    let mut sink = RecordingSink::new();

    find_2disjoint_path_with(&graph, &"A", &"F", &mut sink);

    assert_eq!(
        sink.get(Stage::FirstRawPath),
        Some(&OwnedSnapshot::Path(vec!["A", "B", "E", "F"]))
    );
    assert_eq!(
        sink.get(Stage::SecondRawPath),
        Some(&OwnedSnapshot::Path(vec!["A", "C", "E", "B", "D", "F"]))
    );

    let Some(OwnedSnapshot::Graph(reweighted)) = sink.get(Stage::ReweightedGraph) else {
        panic!("missing reweighted graph");
    };
    assert_eq!(reweighted.weight(&"A", &"B"), Some(0));
    assert_eq!(reweighted.weight(&"C", &"E"), Some(2));
    assert_eq!(reweighted.weight(&"D", &"F"), Some(2));

    let Some(OwnedSnapshot::Graph(residual)) = sink.get(Stage::ResidualGraph) else {
        panic!("missing residual graph");
    };
    assert_eq!(residual.weight(&"E", &"B"), Some(0));
    assert!(!residual.contains_edge(&"B", &"E"));

    let Some(OwnedSnapshot::Graph(stripped)) = sink.get(Stage::CommonEdgesRemoved) else {
        panic!("missing stripped graph");
    };
    assert!(!stripped.contains_edge(&"B", &"E"));
    assert_eq!(stripped.edge_count(), graph.edge_count() - 1);

    let Some(OwnedSnapshot::Graph(combined)) = sink.get(Stage::FinalGraph) else {
        panic!("missing final graph");
    };
    assert_eq!(combined.edge_count(), 6);
}

#[test]
fn test_input_graph_untouched() {
    let graph = two_routes();
    let before = graph.clone();

    find_2disjoint_path(&graph, &"A", &"F");

    assert_eq!(graph, before);
}

#[test]
fn test_idempotent() {
    let graph = two_routes();

    let first_run = find_2disjoint_path(&graph, &"A", &"F");
    let second_run = find_2disjoint_path(&graph, &"A", &"F");

    assert_eq!(first_run, second_run);
}

#[test]
fn test_start_equals_end() {
    let graph = two_routes();

    let (first, second) = find_2disjoint_path(&graph, &"C", &"C");

    assert_eq!(first, vec!["C"]);
    assert_eq!(second, vec!["C"]);
}

#[test]
#[traced_test]
fn test_unreachable_end() {
    let mut graph = two_routes();
    graph.add_node("Z");

    let (first, second) = find_2disjoint_path(&graph, &"A", &"Z");

    assert!(first.is_empty());
    assert!(second.is_empty());
    assert!(logs_contain("no disjoint paths"));
}

#[test]
fn test_single_chain_has_no_pair() {
    let graph = graph_of(&[("A", "B", 1), ("B", "C", 1)]);

    let err = try_find_2disjoint_path(&graph, &"A", &"C", &mut NoopSink).unwrap_err();
    let (first, second) = find_2disjoint_path(&graph, &"A", &"C");

    assert_eq!(err, SuurballeError::NoDisjointPair);
    assert!(first.is_empty() && second.is_empty());
}

fn diamond() -> WeightedDigraph<&'static str> {
    graph_of(&[
        ("A", "B", 1),
        ("A", "C", 5),
        ("B", "C", 1),
        ("B", "D", 3),
        ("C", "D", 1),
        ("D", "E", 2),
    ])
}

#[test]
fn test_diamond_single_entry_has_no_pair() {
    // D -> E is the only way into E.
    let graph = diamond();

    let err = try_find_2disjoint_path(&graph, &"A", &"E", &mut NoopSink).unwrap_err();

    assert_eq!(err, SuurballeError::NoDisjointPair);
}

#[test]
fn test_diamond_pair_to_d() {
    let graph = diamond();
    let mut sink = RecordingSink::new();

    let paths = try_find_2disjoint_path(&graph, &"A", &"D", &mut sink).unwrap();

    assert_eq!(
        sink.get(Stage::FirstRawPath),
        Some(&OwnedSnapshot::Path(vec!["A", "B", "C", "D"]))
    );
    assert_eq!(
        sink.get(Stage::SecondRawPath),
        Some(&OwnedSnapshot::Path(vec!["A", "C", "B", "D"]))
    );
    assert_eq!(paths.first.nodes, vec!["A", "B", "D"]);
    assert_eq!(paths.first.weights, vec![1, 3]);
    assert_eq!(paths.second.nodes, vec!["A", "C", "D"]);
    assert_eq!(paths.second.weights, vec![5, 1]);
    assert_eq!(paths.total_cost(), 10);
}

#[test]
fn test_huge_weights_do_not_panic() {
    let graph = graph_of(&[("A", "B", Weight::MAX), ("B", "C", 1), ("A", "C", 1)]);

    let (first, second) = find_2disjoint_path(&graph, &"A", &"C");
    let tree = dijkstra(&graph, &"A");

    assert!(first.is_empty() && second.is_empty());
    assert_eq!(tree.distance(&"C"), Some(1));
}

#[test]
fn test_antiparallel_edges_not_shared() {
    // Every connection exists both ways with the same weight.
    let mut graph = WeightedDigraph::new();
    for (a, b, w) in [
        ("S", "A", 1),
        ("A", "T", 1),
        ("S", "B", 2),
        ("B", "T", 2),
        ("A", "B", 1),
    ] {
        graph.add_edge(a, b, w);
        graph.add_edge(b, a, w);
    }

    let (first, second) = find_2disjoint_path(&graph, &"S", &"T");

    assert_eq!(first, vec!["S", "A", "T"]);
    assert_eq!(second, vec!["S", "B", "T"]);
}

fn random_graph(rng: &mut StdRng, nodes: u32) -> WeightedDigraph<u32> {
    let mut graph = WeightedDigraph::new();
    // Keep every node reachable from 0 so reweighting is always defined.
    for v in 1..nodes {
        graph.add_edge(0, v, rng.random_range(20..40));
    }
    for u in 1..nodes {
        for v in 0..nodes {
            if u != v && rng.random_bool(0.3) {
                graph.add_edge(u, v, rng.random_range(0..10));
            }
        }
    }
    graph
}

fn petgraph_distances(graph: &WeightedDigraph<u32>, start: u32) -> HashMap<u32, Weight> {
    let mut pg: DiGraph<u32, Weight> = DiGraph::new();
    let indices: HashMap<u32, NodeIndex> = graph.nodes().map(|&n| (n, pg.add_node(n))).collect();
    for (u, v, w) in graph.edges() {
        pg.add_edge(indices[u], indices[v], w);
    }

    petgraph::algo::dijkstra(&pg, indices[&start], None, |edge| *edge.weight())
        .into_iter()
        .map(|(index, dist)| (pg[index], dist))
        .collect()
}

#[test]
fn test_dijkstra_matches_petgraph() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..25 {
        let graph = random_graph(&mut rng, 9);
        let start = rng.random_range(0..9);

        let tree = dijkstra(&graph, &start);
        let expected = petgraph_distances(&graph, start);

        assert_eq!(tree.distances().len(), expected.len());
        for (node, dist) in tree.distances() {
            assert_eq!(expected[node], *dist);
        }
    }
}

#[test]
fn test_shortest_path_properties() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..25 {
        let graph = random_graph(&mut rng, 8);
        let end = rng.random_range(1..8);

        let (path, distances) = shortest_path(&graph, &0, &end).unwrap();

        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&end));
        assert!(is_simple(&path));
        let sum: Weight = path
            .windows(2)
            .map(|pair| graph.weight(&pair[0], &pair[1]).unwrap())
            .sum();
        assert_eq!(sum, distances[&end]);
    }
}

#[test]
fn test_reweighting_preserves_shortest_paths() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..15 {
        let graph = random_graph(&mut rng, 7);
        let potentials = dijkstra(&graph, &0).into_distances();
        let reweighted = reweight::reweight(&graph, &potentials).unwrap();

        assert!(reweighted.edges().all(|(_, _, w)| w >= 0));

        for u in graph.nodes() {
            let original = dijkstra(&graph, u);
            let reduced = dijkstra(&reweighted, u);
            for (v, dist) in original.distances() {
                assert_eq!(reduced.distance(v), Some(dist - potentials[v] + potentials[u]));
            }
        }

        let end = rng.random_range(1..7);
        let (first, _) = shortest_path(&graph, &0, &end).unwrap();
        for pair in first.windows(2) {
            assert_eq!(reweighted.weight(&pair[0], &pair[1]), Some(0));
        }
    }
}

#[test]
fn test_random_pairs_are_disjoint() {
    let mut rng = StdRng::seed_from_u64(2021);
    let mut found = 0;

    for _ in 0..40 {
        let graph = random_graph(&mut rng, 8);
        let end = rng.random_range(1..8);

        let Ok(paths) = try_find_2disjoint_path(&graph, &0, &end, &mut NoopSink) else {
            continue;
        };
        found += 1;

        let shortest = dijkstra(&graph, &0).distance(&end).unwrap();
        for path in [&paths.first, &paths.second] {
            assert_eq!(path.nodes.first(), Some(&0));
            assert_eq!(path.nodes.last(), Some(&end));
            assert!(is_simple(&path.nodes));
            assert!(path.cost() >= shortest);
            for (tail, head, weight) in path.edges() {
                assert_eq!(graph.weight(&tail, &head), Some(weight));
            }
        }
        assert!(
            undirected_edges(&paths.first.nodes)
                .is_disjoint(&undirected_edges(&paths.second.nodes))
        );
        assert_eq!(
            paths.clone(),
            try_find_2disjoint_path(&graph, &0, &end, &mut NoopSink).unwrap()
        );
    }

    assert!(found > 0);
}
