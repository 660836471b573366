//! Choosing one survivor among competing paths and removing the rest.

use ahash::AHashSet;
use rand::Rng;

use crate::error::{AssemblyError, Result};
use crate::graph::debruijn::DeBruijnGraph;
use crate::graph::paths::{path_average_weight, path_length, Path};

/// Which ends of a losing path are deleted along with its interior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointPolicy {
    pub delete_entry_node: bool,
    pub delete_sink_node: bool,
}

impl EndpointPolicy {
    /// Bubbles keep both the shared ancestor and the shared descendant.
    pub const INTERIOR_ONLY: Self = Self { delete_entry_node: false, delete_sink_node: false };
    /// Entry tips lose their divergent start but keep the convergence node.
    pub const ENTRY_TIP: Self = Self { delete_entry_node: true, delete_sink_node: false };
    /// Exit tips lose their divergent end but keep the branching node.
    pub const EXIT_TIP: Self = Self { delete_entry_node: false, delete_sink_node: true };

    /// Slice of `path` that the policy allows to be deleted.
    fn deletable<'a>(&self, path: &'a [String]) -> &'a [String] {
        let n = path.len();
        match (self.delete_entry_node, self.delete_sink_node) {
            (true, true) => path,
            (true, false) => &path[..n.saturating_sub(1)],
            (false, true) => &path[n.min(1)..],
            (false, false) if n >= 2 => &path[1..n - 1],
            (false, false) => &[],
        }
    }
}

/// True when every value equals the first one. Exact comparison: a spread
/// of zero means identical values, not values within some epsilon.
fn no_spread<T: PartialEq>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Index of the first maximum.
fn first_max_index<T: PartialOrd + Copy>(values: &[T]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Pick the surviving path:
/// 1. highest average weight, if the weights are not all equal
/// 2. otherwise the longest path, if the lengths are not all equal
/// 3. otherwise a uniformly random candidate
pub fn best_path_index<R: Rng + ?Sized>(
    path_lengths: &[usize],
    weight_avgs: &[f64],
    rng: &mut R,
) -> Result<usize> {
    if weight_avgs.is_empty() || path_lengths.is_empty() {
        return Err(AssemblyError::InvalidArgument(
            "path selection needs at least one candidate".to_string(),
        ));
    }
    if weight_avgs.len() != path_lengths.len() {
        return Err(AssemblyError::InvalidArgument(format!(
            "{} average weights for {} path lengths",
            weight_avgs.len(),
            path_lengths.len()
        )));
    }

    let index = if !no_spread(weight_avgs) {
        first_max_index(weight_avgs)
    } else if !no_spread(path_lengths) {
        first_max_index(path_lengths)
    } else {
        rng.gen_range(0..path_lengths.len())
    };

    Ok(index)
}

/// Delete the nodes of every path in `paths`, keeping the endpoints the
/// policy protects. Nodes already gone are skipped, so overlapping paths are fine.
pub fn remove_paths(graph: &mut DeBruijnGraph, paths: &[Path], policy: EndpointPolicy) {
    for path in paths {
        for node in policy.deletable(path) {
            graph.remove_node(node);
        }
    }
}

/// Keep the best of `paths` and dismantle the others.
///
/// Losing paths lose the nodes the policy allows, except nodes the survivor
/// also runs through. Any losing edge still standing afterwards that the
/// survivor does not use is dropped too, so every call shrinks the graph.
/// Returns the index of the survivor.
pub fn select_best_path<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    paths: &[Path],
    path_lengths: &[usize],
    weight_avgs: &[f64],
    policy: EndpointPolicy,
    rng: &mut R,
) -> Result<usize> {
    if paths.len() != path_lengths.len() {
        return Err(AssemblyError::InvalidArgument(format!(
            "{} paths for {} path lengths",
            paths.len(),
            path_lengths.len()
        )));
    }
    let best = best_path_index(path_lengths, weight_avgs, rng)?;

    let survivor = &paths[best];
    let kept_nodes: AHashSet<&str> = survivor.iter().map(String::as_str).collect();
    let kept_edges: AHashSet<(&str, &str)> = survivor
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect();

    for (i, path) in paths.iter().enumerate() {
        if i == best {
            continue;
        }
        for node in policy.deletable(path) {
            if !kept_nodes.contains(node.as_str()) {
                graph.remove_node(node);
            }
        }
        for step in path.windows(2) {
            if !kept_edges.contains(&(step[0].as_str(), step[1].as_str())) {
                graph.remove_edge(&step[0], &step[1]);
            }
        }
    }

    Ok(best)
}

/// Score `paths` with the path evaluator and resolve them with `select_best_path`.
pub fn resolve_paths<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    paths: &[Path],
    policy: EndpointPolicy,
    rng: &mut R,
) -> Result<usize> {
    let weight_avgs = paths
        .iter()
        .map(|p| path_average_weight(graph, p))
        .collect::<Result<Vec<f64>>>()?;
    let path_lengths: Vec<usize> = paths.iter().map(|p| path_length(p)).collect();

    select_best_path(graph, paths, &path_lengths, &weight_avgs, policy, rng)
}
