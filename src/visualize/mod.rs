//! Rendering of the assembly graph

pub mod plot;

pub use plot::draw_graph;
