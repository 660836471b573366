use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::config::AssemblyConfig;
use crate::error::Result;
use crate::graph::assembler::{get_contigs, Contig};
use crate::graph::debruijn::DeBruijnGraph;
use crate::graph::simplify::simplify_bubbles;
use crate::graph::tips::{solve_entry_tips, solve_out_tips};
use crate::io::fasta::save_contigs;
use crate::io::fastq::read_sequences;
use crate::io::gfa::save_gfa;
use crate::io::metadata::{write_run_metadata, RunMetadata};
use crate::kmer::kmer::{build_kmer_counts, try_build_kmer_counts, KmerCounts};
use crate::stats::{contig_stats, Stats};
use crate::visualize::plot::draw_graph;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphSize {
    pub nodes: usize,
    pub edges: usize,
}

impl GraphSize {
    pub fn of(graph: &DeBruijnGraph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        }
    }
}

/// How many artifacts each simplification pass removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimplificationReport {
    pub bubbles_resolved: usize,
    pub entry_tips_resolved: usize,
    pub exit_tips_resolved: usize,
}

/// Result of assembling one read set
#[derive(Debug, Clone)]
pub struct Assembly {
    pub reads: usize,
    pub distinct_kmers: usize,
    pub kmer_occurrences: u64,
    pub initial_graph: GraphSize,
    /// The simplified graph the contigs were extracted from
    pub graph: DeBruijnGraph,
    pub report: SimplificationReport,
    pub contigs: Vec<Contig>,
}

/// Run the simplification passes in order: bubbles, entry tips, exit tips.
/// Boundary nodes are recomputed before each tip pass.
pub fn simplify_graph<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    rng: &mut R,
) -> Result<SimplificationReport> {
    let bubbles_resolved = simplify_bubbles(graph, rng)?;

    let starting_nodes = graph.starting_nodes();
    let entry_tips_resolved = solve_entry_tips(graph, &starting_nodes, rng)?;

    let ending_nodes = graph.sink_nodes();
    let exit_tips_resolved = solve_out_tips(graph, &ending_nodes, rng)?;

    Ok(SimplificationReport {
        bubbles_resolved,
        entry_tips_resolved,
        exit_tips_resolved,
    })
}

/// Build, simplify and read out the graph of an existing k-mer table.
pub fn assemble_counts<R: Rng + ?Sized>(counts: &KmerCounts, rng: &mut R) -> Result<Assembly> {
    info!(
        "Counted {} distinct {}-mers ({} occurrences) from {} reads",
        counts.len(),
        counts.k(),
        counts.total(),
        counts.reads()
    );

    let mut graph = DeBruijnGraph::from_kmer_counts(counts);
    let initial_graph = GraphSize::of(&graph);
    info!(
        "Built de Bruijn graph with {} nodes and {} edges",
        initial_graph.nodes, initial_graph.edges
    );

    let report = simplify_graph(&mut graph, rng)?;

    let contigs = get_contigs(&graph, &graph.starting_nodes(), &graph.sink_nodes());
    info!("Extracted {} contigs", contigs.len());

    Ok(Assembly {
        reads: counts.reads(),
        distinct_kmers: counts.len(),
        kmer_occurrences: counts.total(),
        initial_graph,
        graph,
        report,
        contigs,
    })
}

/// Assemble reads from a fallible source such as a FASTQ stream. The first
/// read error aborts the run.
pub fn assemble<I, S, R>(reads: I, k: usize, rng: &mut R) -> Result<Assembly>
where
    I: IntoIterator<Item = Result<S>>,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let counts = try_build_kmer_counts(reads, k)?;
    assemble_counts(&counts, rng)
}

/// Assemble in-memory reads.
pub fn assemble_sequences<I, S, R>(reads: I, k: usize, rng: &mut R) -> Result<Assembly>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let counts = build_kmer_counts(reads, k);
    assemble_counts(&counts, rng)
}

/// Outcome of a file-to-file run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub contigs: usize,
    pub report: SimplificationReport,
    pub stats: Stats,
}

/// FASTQ in, FASTA out, plus the optional GFA, PNG and JSON side outputs.
/// Nothing is written unless the whole assembly succeeded.
pub fn run(config: &AssemblyConfig) -> Result<RunSummary> {
    config.validate()?;
    info!("Starting assembly of {} with k={}", config.input, config.kmer_size);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let reads = read_sequences(&config.input)?;
    let assembly = assemble(reads, config.kmer_size, &mut rng)?;

    save_contigs(&assembly.contigs, &config.output, config.line_width)?;
    info!("Wrote {} contigs to {}", assembly.contigs.len(), config.output);

    if let Some(path) = &config.gfa {
        save_gfa(&assembly.graph.snapshot(), path)?;
        info!("Wrote graph to {}", path);
    }

    if let Some(path) = &config.graph_image {
        draw_graph(&assembly.graph.snapshot(), path, config.seed)?;
        info!("Rendered graph to {}", path);
    }

    if let Some(path) = &config.json_metadata {
        write_run_metadata(&RunMetadata::new(config, &assembly), path)?;
        info!("Wrote run metadata to {}", path);
    }

    let stats = contig_stats(&assembly.contigs);
    info!(
        "Assembly stats: {} contigs, {} bp total, N50 {}, longest {}",
        stats.total_contigs, stats.total_length, stats.n50, stats.longest
    );

    Ok(RunSummary {
        contigs: assembly.contigs.len(),
        report: assembly.report,
        stats,
    })
}
