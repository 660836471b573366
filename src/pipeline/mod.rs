//! Pipeline module - end-to-end assembly

pub mod assemble;

pub use assemble::{assemble, assemble_sequences, run, simplify_graph, Assembly, RunSummary};
