use std::fs::File;
use std::io::BufWriter;

use serde::Serialize;

use crate::config::AssemblyConfig;
use crate::error::Result;
use crate::graph::assembler::Contig;
use crate::pipeline::assemble::{Assembly, GraphSize, SimplificationReport};
use crate::stats::{contig_stats, Stats};

/// Represents metadata for a contig
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContigMetadata {
    pub id: usize,
    pub length: usize,
    pub gc_content: f64,
}

/// Provenance and results of one assembly run
#[derive(Serialize, Debug)]
pub struct RunMetadata<'a> {
    pub config: &'a AssemblyConfig,
    pub reads: usize,
    pub distinct_kmers: usize,
    pub kmer_occurrences: u64,
    pub initial_graph: GraphSize,
    pub final_graph: GraphSize,
    pub simplification: SimplificationReport,
    pub stats: Stats,
    pub contigs: Vec<ContigMetadata>,
}

impl<'a> RunMetadata<'a> {
    pub fn new(config: &'a AssemblyConfig, assembly: &Assembly) -> Self {
        Self {
            config,
            reads: assembly.reads,
            distinct_kmers: assembly.distinct_kmers,
            kmer_occurrences: assembly.kmer_occurrences,
            initial_graph: assembly.initial_graph,
            final_graph: GraphSize::of(&assembly.graph),
            simplification: assembly.report,
            stats: contig_stats(&assembly.contigs),
            contigs: generate_metadata(&assembly.contigs),
        }
    }
}

fn gc_content(sequence: &str) -> f64 {
    let (gc, total) = sequence.chars().fold((0usize, 0usize), |(gc, total), c| {
        let is_gc = matches!(c, 'G' | 'C' | 'g' | 'c');
        (gc + is_gc as usize, total + 1)
    });
    if total > 0 { gc as f64 / total as f64 } else { 0.0 }
}

/// Generate metadata for a list of contigs
pub fn generate_metadata(contigs: &[Contig]) -> Vec<ContigMetadata> {
    contigs
        .iter()
        .map(|c| ContigMetadata {
            id: c.id,
            length: c.len(),
            gc_content: gc_content(&c.sequence),
        })
        .collect()
}

/// Write run metadata as pretty-printed JSON
pub fn write_run_metadata(metadata: &RunMetadata, output: &str) -> Result<()> {
    let file = File::create(output)?;
    serde_json::to_writer_pretty(BufWriter::new(file), metadata)?;
    Ok(())
}
