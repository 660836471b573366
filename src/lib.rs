//! De Bruijn graph assembly of short reads into contigs.
//!
//! Reads are cut into k-mers, the k-mers become the weighted edges of a de
//! Bruijn graph, bubbles and tips left by sequencing errors are collapsed,
//! and every remaining boundary-to-boundary path is spelled out as a contig.

pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod stats;
pub mod visualize;

pub use config::AssemblyConfig;
pub use error::{AssemblyError, Result};
pub use graph::{Contig, DeBruijnGraph, GraphSnapshot};
pub use kmer::KmerCounts;
pub use pipeline::{assemble, assemble_sequences, run, simplify_graph, Assembly};
