//! De Bruijn graph construction, simplification and contig extraction

pub mod assembler;
pub mod debruijn;
pub mod paths;
pub mod select;
pub mod simplify;
pub mod tips;

pub use assembler::{get_contigs, Contig};
pub use debruijn::{DeBruijnGraph, EdgeRecord, GraphSnapshot};
pub use paths::Path;
