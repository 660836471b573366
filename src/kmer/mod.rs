//! K-mer extraction and counting

pub mod kmer;

pub use kmer::{build_kmer_counts, cut_kmers, try_build_kmer_counts, KmerCounts};
