//! Read loading, contig output and graph export

pub mod fasta;
pub mod fastq;
pub mod gfa;
pub mod metadata;
