// src/graph/assembler.rs
use serde::Serialize;

use crate::graph::debruijn::DeBruijnGraph;
use crate::graph::paths::{labels, reaches, simple_paths};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contig {
    pub id: usize,
    pub sequence: String,
    /// Graph nodes the sequence was spelled from
    pub node_path: Vec<String>,
}

impl Contig {
    /// Length in bases.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Spell a path: the first node in full, then the last character of every
/// following node.
pub fn path_to_sequence<S: AsRef<str>>(path: &[S]) -> String {
    let mut sequence = String::new();
    let mut nodes = path.iter();
    if let Some(first) = nodes.next() {
        sequence.push_str(first.as_ref());
    }
    for node in nodes {
        if let Some(last) = node.as_ref().chars().last() {
            sequence.push(last);
        }
    }
    sequence
}

/// Extract one contig per simple path between every (start, sink) pair that
/// is connected. Contigs are numbered in discovery order.
pub fn get_contigs(
    graph: &DeBruijnGraph,
    starting_nodes: &[String],
    ending_nodes: &[String],
) -> Vec<Contig> {
    let mut contigs = Vec::new();

    for start in starting_nodes {
        let Some(s) = graph.node_index(start) else { continue };
        for end in ending_nodes {
            let Some(e) = graph.node_index(end) else { continue };
            if !reaches(graph, s, e) {
                continue;
            }
            for path in simple_paths(graph, s, e) {
                let node_path = labels(graph, &path);
                contigs.push(Contig {
                    id: contigs.len(),
                    sequence: path_to_sequence(&node_path),
                    node_path,
                });
            }
        }
    }

    contigs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::build_kmer_counts;

    #[test]
    fn test_path_to_sequence() {
        assert_eq!(path_to_sequence(&["AC", "CG", "GT", "TA"]), "ACGTA");
        assert_eq!(path_to_sequence(&["ACG"]), "ACG");
        assert_eq!(path_to_sequence::<&str>(&[]), "");
    }

    #[test]
    fn test_get_contigs_single_path() {
        let counts = build_kmer_counts(["ACGT", "CGTA"], 3);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);
        let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());

        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].sequence, "ACGTA");
        assert_eq!(contigs[0].len(), 5);
        assert_eq!(contigs[0].node_path, vec!["AC", "CG", "GT", "TA"]);
    }

    #[test]
    fn test_get_contigs_disjoint_paths() {
        let counts = build_kmer_counts(["AAACCC", "GGGTTT"], 4);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);
        let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());

        let mut sequences: Vec<&str> = contigs.iter().map(|c| c.sequence.as_str()).collect();
        sequences.sort_unstable();
        assert_eq!(sequences, vec!["AAACCC", "GGGTTT"]);
        assert_eq!(contigs.iter().map(|c| c.id).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_get_contigs_branching() {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("AC", "CG", 1);
        graph.add_edge("CG", "GT", 1);
        graph.add_edge("CG", "GA", 1);
        let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());

        let sequences: Vec<&str> = contigs.iter().map(|c| c.sequence.as_str()).collect();
        assert_eq!(sequences, vec!["ACGT", "ACGA"]);
    }

    #[test]
    fn test_get_contigs_skips_unknown_and_unreachable() {
        let counts = build_kmer_counts(["ACGT"], 3);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);
        let starts = vec!["GT".to_string(), "missing".to_string()];
        let ends = vec!["AC".to_string()];
        assert!(get_contigs(&graph, &starts, &ends).is_empty());
    }
}
