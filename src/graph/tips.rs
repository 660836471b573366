//! Trimming of dead-end branches at the entry and exit boundaries of the graph.

use ahash::AHashSet;
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;
use rand::Rng;
use tracing::{debug, info};

use crate::error::Result;
use crate::graph::debruijn::DeBruijnGraph;
use crate::graph::paths::{labels, reaches, simple_paths, Path};
use crate::graph::select::{resolve_paths, EndpointPolicy};

/// Side of the graph a tip hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipSide {
    /// Branches starting at nodes without predecessors
    Entry,
    /// Branches ending at nodes without successors
    Exit,
}

impl TipSide {
    /// Direction in which a branching node fans out towards the boundary.
    fn fan_out(self) -> Direction {
        match self {
            TipSide::Entry => Direction::Incoming,
            TipSide::Exit => Direction::Outgoing,
        }
    }

    fn policy(self) -> EndpointPolicy {
        match self {
            TipSide::Entry => EndpointPolicy::ENTRY_TIP,
            TipSide::Exit => EndpointPolicy::EXIT_TIP,
        }
    }

    fn boundary(self, graph: &DeBruijnGraph) -> Vec<String> {
        match self {
            TipSide::Entry => graph.starting_nodes(),
            TipSide::Exit => graph.sink_nodes(),
        }
    }
}

/// Competing boundary paths meeting at one branching node
#[derive(Debug, Clone, PartialEq)]
pub struct Tip {
    pub side: TipSide,
    pub branch_node: String,
    pub paths: Vec<Path>,
}

/// Find the first node (insertion order) outside `boundary` that fans out
/// towards the boundary and is joined to it by at least two simple paths.
pub fn find_tip(graph: &DeBruijnGraph, boundary: &[String], side: TipSide) -> Option<Tip> {
    let ends: Vec<NodeIndex> = boundary
        .iter()
        .filter_map(|node| graph.node_index(node))
        .collect();
    let end_set: AHashSet<NodeIndex> = ends.iter().copied().collect();

    for node in graph.node_indices() {
        if end_set.contains(&node) || graph.neighbor_indices(node, side.fan_out()).len() < 2 {
            continue;
        }

        let mut paths = Vec::new();
        for &end in &ends {
            let (from, to) = match side {
                TipSide::Entry => (end, node),
                TipSide::Exit => (node, end),
            };
            if reaches(graph, from, to) {
                paths.extend(simple_paths(graph, from, to));
            }
        }

        if paths.len() >= 2 {
            return Some(Tip {
                side,
                branch_node: graph.label(node).to_string(),
                paths: paths.iter().map(|p| labels(graph, p)).collect(),
            });
        }
    }
    None
}

fn trim_tips<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    boundary: &[String],
    side: TipSide,
    rng: &mut R,
) -> Result<usize> {
    let mut boundary = boundary.to_vec();
    let mut resolved = 0;

    while let Some(tip) = find_tip(graph, &boundary, side) {
        debug!(
            "{:?} tip at {} with {} paths",
            side,
            tip.branch_node,
            tip.paths.len()
        );
        resolve_paths(graph, &tip.paths, side.policy(), rng)?;
        resolved += 1;
        boundary = side.boundary(graph);
    }

    info!(
        "Resolved {} {:?} tips ({} boundary nodes left)",
        resolved,
        side,
        boundary.len()
    );
    Ok(resolved)
}

/// Remove dominated entry branches. Starts from `starting_nodes` and
/// recomputes them after every removal until no tip is left.
pub fn solve_entry_tips<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    starting_nodes: &[String],
    rng: &mut R,
) -> Result<usize> {
    trim_tips(graph, starting_nodes, TipSide::Entry, rng)
}

/// Remove dominated exit branches, the mirror of `solve_entry_tips`.
pub fn solve_out_tips<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    ending_nodes: &[String],
    rng: &mut R,
) -> Result<usize> {
    trim_tips(graph, ending_nodes, TipSide::Exit, rng)
}
