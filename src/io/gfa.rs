use std::fs::File;
use std::io::{BufWriter, Write};

use ahash::AHashMap;

use crate::error::Result;
use crate::graph::debruijn::GraphSnapshot;

pub struct GfaWriter<W: Write> {
    writer: W,
}

impl GfaWriter<BufWriter<File>> {
    pub fn create(output_path: &str) -> Result<Self> {
        let file = File::create(output_path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> GfaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the header, one segment per node and one link per edge.
    /// Segments are named `n{position}` in node order; links overlap by k-2
    /// bases and carry the k-mer count as read count.
    pub fn write_graph(&mut self, snapshot: &GraphSnapshot) -> Result<()> {
        writeln!(self.writer, "H\tVN:Z:1.0")?;

        let mut names = AHashMap::with_capacity(snapshot.nodes.len());
        for (i, node) in snapshot.nodes.iter().enumerate() {
            let name = format!("n{}", i);
            writeln!(self.writer, "S\t{}\t{}", name, node)?;
            names.insert(node.as_str(), name);
        }

        let overlap = snapshot.kmer_size.saturating_sub(2);
        for edge in &snapshot.edges {
            let (Some(from), Some(to)) = (names.get(edge.from.as_str()), names.get(edge.to.as_str())) else {
                continue;
            };
            writeln!(
                self.writer,
                "L\t{}\t+\t{}\t+\t{}M\tRC:i:{}",
                from, to, overlap, edge.weight
            )?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Export a graph snapshot to a GFA 1.0 file
pub fn save_gfa(snapshot: &GraphSnapshot, path: &str) -> Result<()> {
    let mut writer = GfaWriter::create(path)?;
    writer.write_graph(snapshot)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::debruijn::DeBruijnGraph;
    use crate::kmer::build_kmer_counts;

    #[test]
    fn test_write_graph() {
        let counts = build_kmer_counts(["ACGT", "CGTA"], 3);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);

        let mut writer = GfaWriter::new(Vec::new());
        writer.write_graph(&graph.snapshot()).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "H\tVN:Z:1.0");
        assert_eq!(lines[1], "S\tn0\tAC");
        assert_eq!(lines[4], "S\tn3\tTA");
        assert_eq!(lines[5], "L\tn0\t+\tn1\t+\t1M\tRC:i:1");
        assert_eq!(lines[6], "L\tn1\t+\tn2\t+\t1M\tRC:i:2");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_save_gfa() {
        let counts = build_kmer_counts(["GATTACA"], 4);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        save_gfa(&graph.snapshot(), path).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with('S')).count(), 5);
        assert_eq!(text.lines().filter(|l| l.starts_with('L')).count(), 4);
    }
}
