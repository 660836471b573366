//! Path queries over the de Bruijn graph: reachability, closest common
//! ancestors, simple path enumeration and path statistics.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use crate::error::{AssemblyError, Result};
use crate::graph::debruijn::DeBruijnGraph;

/// A walk through the graph, as node sequences
pub type Path = Vec<String>;

/// Number of nodes on a path.
pub fn path_length(path: &[String]) -> usize {
    path.len()
}

/// Mean weight of the edges joining consecutive nodes of `path`.
///
/// A path needs at least two nodes to have an edge, anything shorter is
/// rejected as an invalid argument.
pub fn path_average_weight(graph: &DeBruijnGraph, path: &[String]) -> Result<f64> {
    if path.len() < 2 {
        return Err(AssemblyError::InvalidArgument(format!(
            "average weight needs a path of at least 2 nodes, got {}",
            path.len()
        )));
    }

    let mut total = 0u64;
    for step in path.windows(2) {
        let a = require_node(graph, &step[0])?;
        let b = require_node(graph, &step[1])?;
        let weight = graph
            .index_edge_weight(a, b)
            .ok_or_else(|| AssemblyError::MissingEdge {
                from: step[0].clone(),
                to: step[1].clone(),
            })?;
        total += weight as u64;
    }

    Ok(total as f64 / (path.len() - 1) as f64)
}

/// Enumerate every simple path from `source` to `target`.
pub fn all_simple_paths(graph: &DeBruijnGraph, source: &str, target: &str) -> Result<Vec<Path>> {
    let s = require_node(graph, source)?;
    let t = require_node(graph, target)?;
    Ok(simple_paths(graph, s, t)
        .iter()
        .map(|p| labels(graph, p))
        .collect())
}

/// Whether `target` can be reached from `source` by following edges.
pub fn has_path(graph: &DeBruijnGraph, source: &str, target: &str) -> Result<bool> {
    let s = require_node(graph, source)?;
    let t = require_node(graph, target)?;
    Ok(reaches(graph, s, t))
}

/// Closest node that is an ancestor of both `a` and `b` (a node is its own
/// ancestor). Ties on combined distance go to the earliest inserted node.
pub fn lowest_common_ancestor(graph: &DeBruijnGraph, a: &str, b: &str) -> Result<Option<String>> {
    let a = require_node(graph, a)?;
    let b = require_node(graph, b)?;
    Ok(common_ancestor(graph, a, b).map(|ix| graph.label(ix).to_string()))
}

fn require_node(graph: &DeBruijnGraph, node: &str) -> Result<NodeIndex> {
    graph
        .node_index(node)
        .ok_or_else(|| AssemblyError::UnknownNode(node.to_string()))
}

pub(crate) fn labels(graph: &DeBruijnGraph, path: &[NodeIndex]) -> Path {
    path.iter().map(|&ix| graph.label(ix).to_string()).collect()
}

/// Depth-first enumeration with the on-path set rolled back on backtrack.
/// Paths are discovered in neighbour insertion order.
pub(crate) fn simple_paths(
    graph: &DeBruijnGraph,
    source: NodeIndex,
    target: NodeIndex,
) -> Vec<Vec<NodeIndex>> {
    let mut paths = Vec::new();
    if source == target {
        return paths;
    }

    let mut current = vec![source];
    let mut on_path: AHashSet<NodeIndex> = AHashSet::new();
    on_path.insert(source);
    let mut stack = vec![graph.neighbor_indices(source, Direction::Outgoing).into_iter()];

    while let Some(children) = stack.last_mut() {
        let Some(child) = children.next() else {
            stack.pop();
            if let Some(done) = current.pop() {
                on_path.remove(&done);
            }
            continue;
        };

        if child == target {
            let mut path = current.clone();
            path.push(target);
            paths.push(path);
        } else if !on_path.contains(&child) {
            current.push(child);
            on_path.insert(child);
            stack.push(graph.neighbor_indices(child, Direction::Outgoing).into_iter());
        }
    }

    paths
}

/// Breadth-first reachability with early exit.
pub(crate) fn reaches(graph: &DeBruijnGraph, source: NodeIndex, target: NodeIndex) -> bool {
    if source == target {
        return true;
    }

    let mut seen = AHashSet::new();
    let mut queue = VecDeque::from([source]);
    seen.insert(source);

    while let Some(node) = queue.pop_front() {
        for next in graph.neighbor_indices(node, Direction::Outgoing) {
            if next == target {
                return true;
            }
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    false
}

/// Reverse BFS: every ancestor of `node` with its distance, `node` itself at 0.
fn ancestor_distances(graph: &DeBruijnGraph, node: NodeIndex) -> AHashMap<NodeIndex, usize> {
    let mut dist = AHashMap::new();
    let mut queue = VecDeque::from([node]);
    dist.insert(node, 0);

    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for prev in graph.neighbor_indices(current, Direction::Incoming) {
            if !dist.contains_key(&prev) {
                dist.insert(prev, d + 1);
                queue.push_back(prev);
            }
        }
    }

    dist
}

pub(crate) fn common_ancestor(graph: &DeBruijnGraph, a: NodeIndex, b: NodeIndex) -> Option<NodeIndex> {
    let from_a = ancestor_distances(graph, a);
    let from_b = ancestor_distances(graph, b);

    from_a
        .iter()
        .filter_map(|(&ix, &da)| from_b.get(&ix).map(|&db| (da + db, ix)))
        .min()
        .map(|(_, ix)| ix)
}
