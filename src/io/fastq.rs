// src/io/fastq.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use flate2::read::MultiGzDecoder;

use crate::error::{AssemblyError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub header: String,
    pub sequence: String,
    pub plus: String,
    pub quality: String,
}

/// Open a FASTQ file, decompressing `.gz` input on the fly
pub fn open_fastq(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Stream FASTQ records one at a time.
///
/// Records are validated as they are read: a header without `@`, a
/// separator without `+` or a truncated final record ends the stream with a
/// `MalformedRecord` error carrying the offending line number.
pub fn stream_fastq_records<R: BufRead>(reader: R) -> FastqStreamParser<io::Lines<R>> {
    FastqStreamParser {
        lines: reader.lines(),
        line_no: 0,
        finished: false,
    }
}

/// Stream only the read sequences of a FASTQ file
pub fn read_sequences(path: &str) -> Result<impl Iterator<Item = Result<String>>> {
    let reader = open_fastq(path)?;
    Ok(stream_fastq_records(reader).map(|record| record.map(|r| r.sequence)))
}

/// Iterator adaptor to handle streaming FASTQ parsing
pub struct FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    lines: I,
    line_no: usize,
    finished: bool,
}

impl<I> FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    fn next_line(&mut self) -> Option<Result<String>> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line.map_err(AssemblyError::from))
    }

    fn malformed(&self, reason: impl Into<String>) -> AssemblyError {
        AssemblyError::MalformedRecord {
            line: self.line_no,
            reason: reason.into(),
        }
    }

    fn required_line(&mut self, what: &str) -> Result<String> {
        match self.next_line() {
            Some(line) => line,
            None => Err(self.malformed(format!("truncated record, missing {} line", what))),
        }
    }

    fn parse_record(&mut self, header: String) -> Result<FastqRecord> {
        if !header.starts_with('@') {
            return Err(self.malformed("header does not start with '@'"));
        }

        let sequence = self.required_line("sequence")?.trim().to_string();

        let plus = self.required_line("separator")?;
        if !plus.starts_with('+') {
            return Err(self.malformed("separator does not start with '+'"));
        }

        let quality = self.required_line("quality")?;

        Ok(FastqRecord {
            header,
            sequence,
            plus,
            quality,
        })
    }
}

impl<I> Iterator for FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        // blank lines between or after records are tolerated
        let header = loop {
            match self.next_line()? {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => break line,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        };

        let record = self.parse_record(header);
        if record.is_err() {
            self.finished = true;
        }
        Some(record)
    }
}
