use bruijn::graph::assembler::get_contigs;
use bruijn::graph::paths::all_simple_paths;
use bruijn::graph::simplify::simplify_bubbles;
use bruijn::graph::tips::{solve_entry_tips, solve_out_tips};
use bruijn::{simplify_graph, DeBruijnGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn graph_from(edges: &[(&str, &str, u32)]) -> DeBruijnGraph {
    let mut graph = DeBruijnGraph::new(3);
    for &(from, to, weight) in edges {
        graph.add_edge(from, to, weight);
    }
    graph
}

fn nodes(graph: &DeBruijnGraph) -> Vec<&str> {
    graph.nodes().collect()
}

#[test]
fn test_entry_tip_keeps_heavier_start() {
    let mut graph = graph_from(&[
        ("s1", "a", 5),
        ("a", "b", 5),
        ("b", "m", 5),
        ("s2", "c", 1),
        ("c", "m", 1),
        ("m", "e", 3),
    ]);
    let mut rng = StdRng::seed_from_u64(9001);
    let starts = graph.starting_nodes();

    assert_eq!(solve_entry_tips(&mut graph, &starts, &mut rng).unwrap(), 1);
    assert_eq!(graph.starting_nodes(), vec!["s1".to_string()]);
    assert_eq!(nodes(&graph), vec!["s1", "a", "b", "m", "e"]);

    let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());
    assert_eq!(contigs.len(), 1);
    assert_eq!(contigs[0].node_path, vec!["s1", "a", "b", "m", "e"]);
}

#[test]
fn test_exit_tip_keeps_heavier_sink() {
    let mut graph = graph_from(&[
        ("s", "m", 3),
        ("m", "a", 5),
        ("a", "e1", 5),
        ("m", "b", 1),
        ("b", "c", 1),
        ("c", "e2", 1),
    ]);
    let mut rng = StdRng::seed_from_u64(9001);
    let sinks = graph.sink_nodes();

    assert_eq!(solve_out_tips(&mut graph, &sinks, &mut rng).unwrap(), 1);
    assert_eq!(graph.sink_nodes(), vec!["e1".to_string()]);
    assert_eq!(nodes(&graph), vec!["s", "m", "a", "e1"]);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_equal_weight_exit_tips_keep_longer_branch() {
    let mut graph = graph_from(&[
        ("s", "m", 2),
        ("m", "x", 2),
        ("x", "y", 2),
        ("y", "e1", 2),
        ("m", "e2", 2),
    ]);
    let mut rng = StdRng::seed_from_u64(9001);
    let sinks = graph.sink_nodes();

    solve_out_tips(&mut graph, &sinks, &mut rng).unwrap();
    assert_eq!(nodes(&graph), vec!["s", "m", "x", "y", "e1"]);
}

#[test]
fn test_consecutive_bubbles_collapse_to_one_path() {
    let mut graph = graph_from(&[
        ("r", "a", 4),
        ("a", "j", 4),
        ("r", "b", 2),
        ("b", "j", 2),
        ("j", "p", 4),
        ("p", "z", 4),
        ("j", "q", 1),
        ("q", "z", 1),
        ("z", "t", 4),
    ]);
    let mut rng = StdRng::seed_from_u64(9001);

    assert_eq!(simplify_bubbles(&mut graph, &mut rng).unwrap(), 2);
    assert_eq!(nodes(&graph), vec!["r", "a", "j", "p", "z", "t"]);
    assert_eq!(all_simple_paths(&graph, "r", "t").unwrap().len(), 1);
    assert_eq!(simplify_bubbles(&mut graph, &mut rng).unwrap(), 0);
}

#[test]
fn test_fully_tied_bubble_keeps_exactly_one_branch() {
    for seed in 0..8 {
        let mut graph = graph_from(&[("r", "a", 2), ("a", "j", 2), ("r", "b", 2), ("b", "j", 2)]);
        let mut rng = StdRng::seed_from_u64(seed);

        assert_eq!(simplify_bubbles(&mut graph, &mut rng).unwrap(), 1);
        assert_eq!(graph.node_count(), 3);
        assert!(graph.contains_node("a") ^ graph.contains_node("b"));
        assert_eq!(all_simple_paths(&graph, "r", "j").unwrap().len(), 1);
    }
}

#[test]
fn test_disjoint_paths_are_independent_contigs() {
    let mut graph = graph_from(&[
        ("AC", "CG", 3),
        ("CG", "GT", 3),
        ("TT", "TA", 2),
        ("TA", "AA", 2),
    ]);
    let mut rng = StdRng::seed_from_u64(9001);

    let report = simplify_graph(&mut graph, &mut rng).unwrap();
    assert_eq!(report.bubbles_resolved, 0);
    assert_eq!(report.entry_tips_resolved, 0);
    assert_eq!(report.exit_tips_resolved, 0);

    let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());
    let mut sequences: Vec<&str> = contigs.iter().map(|c| c.sequence.as_str()).collect();
    sequences.sort_unstable();
    assert_eq!(sequences, vec!["ACGT", "TTAA"]);
}

#[test]
fn test_simplify_graph_on_empty_graph() {
    let mut graph = DeBruijnGraph::new(5);
    let mut rng = StdRng::seed_from_u64(9001);
    let report = simplify_graph(&mut graph, &mut rng).unwrap();
    assert_eq!(report.bubbles_resolved + report.entry_tips_resolved + report.exit_tips_resolved, 0);
    assert!(get_contigs(&graph, &[], &[]).is_empty());
}
