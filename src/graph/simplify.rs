use rand::Rng;
use tracing::{debug, info};

use crate::error::Result;
use crate::graph::debruijn::DeBruijnGraph;
use crate::graph::paths::{all_simple_paths, common_ancestor, labels, simple_paths, Path};
use crate::graph::select::{resolve_paths, EndpointPolicy};

/// Divergent paths that reconverge on `descendant`
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub ancestor: String,
    pub descendant: String,
    pub paths: Vec<Path>,
}

/// Find the first bubble in node insertion order.
///
/// A node closes a bubble when two of its predecessors share a closest common
/// ancestor from which at least two simple paths reach the node.
pub fn find_bubble(graph: &DeBruijnGraph) -> Option<Bubble> {
    for node in graph.node_indices() {
        let preds = graph.neighbor_indices(node, petgraph::Direction::Incoming);
        if preds.len() < 2 {
            continue;
        }

        for i in 0..preds.len() {
            for j in i + 1..preds.len() {
                let Some(ancestor) = common_ancestor(graph, preds[i], preds[j]) else {
                    continue;
                };
                let paths = simple_paths(graph, ancestor, node);
                if paths.len() >= 2 {
                    return Some(Bubble {
                        ancestor: graph.label(ancestor).to_string(),
                        descendant: graph.label(node).to_string(),
                        paths: paths.iter().map(|p| labels(graph, p)).collect(),
                    });
                }
            }
        }
    }
    None
}

/// Collapse the bubble between `ancestor` and `descendant` to its best path.
/// Both anchors are kept. Returns the index of the surviving path.
pub fn solve_bubble<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    ancestor: &str,
    descendant: &str,
    rng: &mut R,
) -> Result<usize> {
    let paths = all_simple_paths(graph, ancestor, descendant)?;
    resolve_paths(graph, &paths, EndpointPolicy::INTERIOR_ONLY, rng)
}

/// Resolve bubbles until a full scan finds none. Every round rescans the
/// whole graph because a collapse can expose or remove other bubbles.
/// Returns the number of bubbles resolved.
pub fn simplify_bubbles<R: Rng + ?Sized>(graph: &mut DeBruijnGraph, rng: &mut R) -> Result<usize> {
    let mut resolved = 0;

    while let Some(bubble) = find_bubble(graph) {
        debug!(
            "Bubble {} -> {} with {} paths",
            bubble.ancestor,
            bubble.descendant,
            bubble.paths.len()
        );
        resolve_paths(graph, &bubble.paths, EndpointPolicy::INTERIOR_ONLY, rng)?;
        resolved += 1;
    }

    info!(
        "Resolved {} bubbles ({} nodes, {} edges left)",
        resolved,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(resolved)
}
