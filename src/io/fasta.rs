// src/io/fasta.rs
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Result;
use crate::graph::assembler::Contig;

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Write `sequence` in lines of at most `width` characters
fn write_wrapped<W: Write + ?Sized>(writer: &mut W, sequence: &str, width: usize) -> Result<()> {
    let width = width.max(1);
    let mut line = String::with_capacity(width);
    let mut filled = 0;
    for c in sequence.chars() {
        line.push(c);
        filled += 1;
        if filled == width {
            writeln!(writer, "{}", line)?;
            line.clear();
            filled = 0;
        }
    }
    if !line.is_empty() {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

impl FastaWriter {
    pub fn new(path: &str) -> Result<Self> {
        let file = File::create(path)?;
        if path.ends_with(".gz") {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            FastaWriter::Plain(writer) => writer,
            FastaWriter::Compressed(writer) => writer,
        }
    }

    /// Write `>contig_{id} len={length}` followed by the wrapped sequence
    pub fn write_contig(&mut self, contig: &Contig, line_width: usize) -> Result<()> {
        let writer = self.writer();
        writeln!(writer, ">contig_{} len={}", contig.id, contig.len())?;
        write_wrapped(writer, &contig.sequence, line_width)
    }

    /// Flush buffers and finish the gzip stream if there is one
    pub fn finish(self) -> Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => writer.flush()?,
            FastaWriter::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
            }
        }
        Ok(())
    }
}

/// Save contigs as FASTA, one record per contig in order
pub fn save_contigs(contigs: &[Contig], path: &str, line_width: usize) -> Result<()> {
    let mut writer = FastaWriter::new(path)?;
    for contig in contigs {
        writer.write_contig(contig, line_width)?;
    }
    writer.finish()
}

/// Read every FASTA record as `(header, sequence)`, joining wrapped lines
pub fn read_fasta_records(path: &str) -> Result<Vec<(String, String)>> {
    let reader = open_fasta(path)?;
    let mut records = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some((header.trim().to_string(), String::new()));
        } else if let Some((_, sequence)) = current.as_mut() {
            sequence.push_str(line.trim());
        }
    }
    if let Some(record) = current {
        records.push(record);
    }

    Ok(records)
}
