use ahash::AHashMap;
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{AssemblyError, Result};
use crate::graph::debruijn::GraphSnapshot;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;
const MARGIN: i32 = 20;
/// Edges heavier than this are drawn solid and thick
const HEAVY_EDGE_WEIGHT: u32 = 3;

fn render_error<E: std::fmt::Display>(e: E) -> AssemblyError {
    AssemblyError::Render(e.to_string())
}

/// Place every node uniformly at random inside the canvas margins.
/// The same seed always yields the same layout.
pub fn random_layout(snapshot: &GraphSnapshot, seed: u64) -> AHashMap<&str, (i32, i32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    snapshot
        .nodes
        .iter()
        .map(|node| {
            let x = rng.gen_range(MARGIN..WIDTH as i32 - MARGIN);
            let y = rng.gen_range(MARGIN..HEIGHT as i32 - MARGIN);
            (node.as_str(), (x, y))
        })
        .collect()
}

/// Render the graph as a PNG: node dots, heavy edges in thick black, light
/// edges in translucent blue.
pub fn draw_graph(snapshot: &GraphSnapshot, output: &str, seed: u64) -> Result<()> {
    let root = BitMapBackend::new(output, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let layout = random_layout(snapshot, seed);

    for edge in &snapshot.edges {
        let (Some(&from), Some(&to)) = (layout.get(edge.from.as_str()), layout.get(edge.to.as_str())) else {
            continue;
        };
        let style = if edge.weight > HEAVY_EDGE_WEIGHT {
            BLACK.stroke_width(6)
        } else {
            BLUE.mix(0.5).stroke_width(3)
        };
        root.draw(&PathElement::new(vec![from, to], style))
            .map_err(render_error)?;
    }

    for node in &snapshot.nodes {
        if let Some(&pos) = layout.get(node.as_str()) {
            root.draw(&Circle::new(pos, 3, BLACK.filled()))
                .map_err(render_error)?;
        }
    }

    root.present().map_err(render_error)?;
    Ok(())
}
