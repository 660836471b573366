use ahash::AHashMap;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::kmer::kmer::{kmer_prefix, kmer_suffix, KmerCounts};

/// Directed de Bruijn graph:
/// - Nodes are (k-1)-mers, identified by their sequence
/// - Edge weights are k-mer occurrence counts
///
/// Backed by a `StableDiGraph` so node indices survive removals. Nodes are
/// iterated in insertion order, which keeps every simplification scan
/// reproducible. Adding nodes after removals may reuse vacated slots and
/// break that order, so the graph is only grown while it is being built.
#[derive(Debug, Clone, Default)]
pub struct DeBruijnGraph {
    kmer_size: usize,
    graph: StableDiGraph<String, u32>,
    index: AHashMap<String, NodeIndex>,
}

/// A single weighted edge of a graph snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

/// Read-only copy of a graph, for rendering and export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub kmer_size: usize,
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeRecord>,
}

impl DeBruijnGraph {
    pub fn new(kmer_size: usize) -> Self {
        Self {
            kmer_size,
            ..Default::default()
        }
    }

    /// Build the graph from a k-mer table: every k-mer becomes one edge from
    /// its prefix to its suffix, weighted by its count.
    pub fn from_kmer_counts(counts: &KmerCounts) -> Self {
        let mut graph = Self::new(counts.k());
        for (kmer, count) in counts.iter() {
            graph.add_edge(kmer_prefix(kmer), kmer_suffix(kmer), count);
        }
        graph
    }

    pub fn kmer_size(&self) -> usize {
        self.kmer_size
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    pub(crate) fn node_index(&self, node: &str) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    pub(crate) fn label(&self, ix: NodeIndex) -> &str {
        &self.graph[ix]
    }

    /// Return the index of `node`, inserting it if it is new.
    pub fn add_node(&mut self, node: &str) -> NodeIndex {
        if let Some(&ix) = self.index.get(node) {
            return ix;
        }
        let ix = self.graph.add_node(node.to_string());
        self.index.insert(node.to_string(), ix);
        ix
    }

    /// Add an edge or overwrite the weight of an existing one.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: u32) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        match self.graph.find_edge(a, b) {
            Some(e) => self.graph[e] = weight,
            None => {
                self.graph.add_edge(a, b, weight);
            }
        }
    }

    pub fn edge_weight(&self, from: &str, to: &str) -> Option<u32> {
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        self.index_edge_weight(a, b)
    }

    pub(crate) fn index_edge_weight(&self, a: NodeIndex, b: NodeIndex) -> Option<u32> {
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(move |ix| self.graph[ix].as_str())
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Neighbours of `ix` in one direction, in node insertion order.
    pub(crate) fn neighbor_indices(&self, ix: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(ix, dir).collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    pub(crate) fn degree(&self, ix: NodeIndex, dir: Direction) -> usize {
        self.graph.edges_directed(ix, dir).count()
    }

    pub fn predecessors(&self, node: &str) -> Vec<&str> {
        self.neighbors(node, Direction::Incoming)
    }

    pub fn successors(&self, node: &str) -> Vec<&str> {
        self.neighbors(node, Direction::Outgoing)
    }

    fn neighbors(&self, node: &str, dir: Direction) -> Vec<&str> {
        match self.node_index(node) {
            Some(ix) => self
                .neighbor_indices(ix, dir)
                .into_iter()
                .map(|n| self.label(n))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn in_degree(&self, node: &str) -> usize {
        self.node_index(node)
            .map(|ix| self.degree(ix, Direction::Incoming))
            .unwrap_or(0)
    }

    pub fn out_degree(&self, node: &str) -> usize {
        self.node_index(node)
            .map(|ix| self.degree(ix, Direction::Outgoing))
            .unwrap_or(0)
    }

    /// Remove a node together with its incident edges. Returns false if the
    /// node was already gone.
    pub fn remove_node(&mut self, node: &str) -> bool {
        match self.index.remove(node) {
            Some(ix) => {
                self.graph.remove_node(ix);
                true
            }
            None => false,
        }
    }

    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(a), Some(b)) = (self.node_index(from), self.node_index(to)) else {
            return false;
        };
        match self.graph.find_edge(a, b) {
            Some(e) => self.graph.remove_edge(e).is_some(),
            None => false,
        }
    }

    /// Nodes without predecessors, in insertion order.
    pub fn starting_nodes(&self) -> Vec<String> {
        self.boundary_nodes(Direction::Incoming)
    }

    /// Nodes without successors, in insertion order.
    pub fn sink_nodes(&self) -> Vec<String> {
        self.boundary_nodes(Direction::Outgoing)
    }

    pub(crate) fn boundary_nodes(&self, dir: Direction) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|&ix| self.degree(ix, dir) == 0)
            .map(|ix| self.graph[ix].clone())
            .collect()
    }

    /// All edges as `(from, to, weight)`, ordered by source then target insertion order.
    pub fn edges(&self) -> Vec<(&str, &str, u32)> {
        let mut edges: Vec<(NodeIndex, NodeIndex, u32)> = self
            .graph
            .edge_references()
            .map(|e| (e.source(), e.target(), *e.weight()))
            .collect();
        edges.sort_unstable_by_key(|&(a, b, _)| (a, b));
        edges
            .into_iter()
            .map(|(a, b, w)| (self.label(a), self.label(b), w))
            .collect()
    }

    /// Check the de Bruijn edge invariant: every edge joins two (k-1)-mers
    /// overlapping by k-2 characters, with a positive weight.
    pub fn is_well_formed(&self) -> bool {
        let node_len = self.kmer_size.saturating_sub(1);
        self.edges().into_iter().all(|(a, b, w)| {
            w >= 1
                && a.chars().count() == node_len
                && b.chars().count() == node_len
                && kmer_suffix(a) == kmer_prefix(b)
        })
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            kmer_size: self.kmer_size,
            nodes: self.nodes().map(str::to_string).collect(),
            edges: self
                .edges()
                .into_iter()
                .map(|(from, to, weight)| EdgeRecord {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::build_kmer_counts;

    #[test]
    fn test_build_graph_from_reads() {
        let counts = build_kmer_counts(["ACGT", "CGTA"], 3);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["AC", "CG", "GT", "TA"]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge_weight("AC", "CG"), Some(1));
        assert_eq!(graph.edge_weight("CG", "GT"), Some(2));
        assert_eq!(graph.edge_weight("GT", "TA"), Some(1));
        assert_eq!(graph.edge_weight("AC", "TA"), None);
        assert!(graph.is_well_formed());

        assert_eq!(graph.starting_nodes(), vec!["AC"]);
        assert_eq!(graph.sink_nodes(), vec!["TA"]);
    }

    #[test]
    fn test_every_kmer_yields_one_edge() {
        let reads = ["TCAGAGCTCTAGAGGCT", "AGAGCTCTAGAGG", "GGCTTAGAGCT"];
        let counts = build_kmer_counts(reads, 5);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);

        assert_eq!(graph.edge_count(), counts.len());
        for (kmer, count) in counts.iter() {
            assert_eq!(graph.edge_weight(&kmer[..4], &kmer[1..]), Some(count));
        }
        assert!(graph.is_well_formed());
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let counts = build_kmer_counts(["ACGTA"], 3);
        let mut graph = DeBruijnGraph::from_kmer_counts(&counts);

        assert!(graph.remove_node("CG"));
        assert!(!graph.remove_node("CG"));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.starting_nodes(), vec!["AC", "GT"]);
        assert_eq!(graph.sink_nodes(), vec!["AC", "TA"]);
    }

    #[test]
    fn test_neighbors_follow_insertion_order() {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("TA", "AC", 1);
        graph.add_edge("GA", "AC", 1);
        graph.add_edge("CA", "AC", 1);

        assert_eq!(graph.predecessors("AC"), vec!["TA", "GA", "CA"]);
        assert_eq!(graph.in_degree("AC"), 3);
        assert_eq!(graph.out_degree("AC"), 0);
        assert!(graph.successors("missing").is_empty());
    }

    #[test]
    fn test_add_edge_overwrites_weight() {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("AC", "CG", 1);
        graph.add_edge("AC", "CG", 7);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("AC", "CG"), Some(7));
    }

    #[test]
    fn test_edges_and_snapshot_follow_source_order() {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("CG", "GT", 2);
        graph.add_edge("AC", "CG", 1);
        graph.add_edge("CG", "GA", 4);

        assert_eq!(
            graph.edges(),
            vec![("CG", "GT", 2), ("CG", "GA", 4), ("AC", "CG", 1)]
        );

        let snapshot = graph.snapshot();
        assert_eq!(snapshot.kmer_size, 3);
        assert_eq!(snapshot.nodes, vec!["CG", "GT", "AC", "GA"]);
        assert_eq!(
            snapshot.edges[2],
            EdgeRecord { from: "AC".to_string(), to: "CG".to_string(), weight: 1 }
        );
        assert!(graph.is_well_formed());
    }

    #[test]
    fn test_empty_counts_give_empty_graph() {
        let counts = build_kmer_counts(["AC"], 5);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);
        assert!(graph.is_empty());
        assert!(graph.starting_nodes().is_empty());
        assert!(graph.snapshot().edges.is_empty());
    }
}
