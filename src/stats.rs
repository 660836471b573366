use serde::Serialize;

use crate::error::Result;
use crate::graph::assembler::Contig;
use crate::io::fasta::read_fasta_records;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_contigs: usize,
    pub total_length: usize,
    pub average_length: f64,
    pub n50: usize,
    pub longest: usize,
}

/// Summary statistics over a set of sequence lengths
pub fn stats_from_lengths(mut lengths: Vec<usize>) -> Stats {
    lengths.sort_unstable();
    let total: usize = lengths.iter().sum();
    let total_contigs = lengths.len();
    let avg = if total_contigs > 0 { total as f64 / total_contigs as f64 } else { 0.0 };

    // Calculate N50
    let mut acc = 0;
    let n50 = lengths.iter().rev().find(|&&len| {
        acc += len;
        2 * acc >= total
    }).copied().unwrap_or(0);

    Stats {
        total_contigs,
        total_length: total,
        average_length: avg,
        n50,
        longest: lengths.last().copied().unwrap_or(0),
    }
}

pub fn contig_stats(contigs: &[Contig]) -> Stats {
    stats_from_lengths(contigs.iter().map(Contig::len).collect())
}

/// Statistics of the records in a FASTA(.gz) file
pub fn calculate_stats(path: &str) -> Result<Stats> {
    let records = read_fasta_records(path)?;
    Ok(stats_from_lengths(
        records.iter().map(|(_, seq)| seq.chars().count()).collect(),
    ))
}
