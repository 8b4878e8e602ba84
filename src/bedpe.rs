//! Format B reader: 10-field paired-interval records.
//!
//! Layout per line: `chrom1 start1 end1 chrom2 start2 end2 name score
//! strand1 strand2`, whitespace separated. Only the first mate's
//! chromosome and start, the second mate's end (field 6) used as the
//! fragment end, and the first strand are consumed; the second mate's
//! chromosome, start, and strand are discarded. This is a deliberate
//! simplification: a pair is collapsed into one fragment-spanning
//! interval on the first mate's strand.

use crate::bed::{parse_coord, parse_strand, ReadError, Result};
use crate::interval::RawRecord;
use std::io::BufRead;
use std::path::Path;

/// A streaming reader for Format B records.
pub struct BedpeReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl BedpeReader<Box<dyn BufRead>> {
    /// Open a file, decoding gzip transparently.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(crate::io::open(path)?))
    }
}

impl<R: BufRead> BedpeReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::with_capacity(1024),
        }
    }

    /// Read the next record, skipping blank lines and headers.
    pub fn read_record(&mut self) -> Result<Option<RawRecord>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            return self.parse_line(line).map(Some);
        }
    }

    fn parse_line(&self, line: &str) -> Result<RawRecord> {
        let fields: Vec<&str> = line.split_ascii_whitespace().collect();

        if fields.len() < 10 {
            return Err(ReadError::Parse {
                line: self.line_number,
                message: format!("expected at least 10 fields, got {}", fields.len()),
            });
        }

        let start = parse_coord(fields[1], "start", self.line_number)?;
        let end = parse_coord(fields[5], "end", self.line_number)?;
        let strand = parse_strand(fields[8], self.line_number)?;

        Ok(RawRecord::new(fields[0], start, end, strand))
    }

    /// Iterator over all records, surfacing parse errors.
    pub fn records(self) -> Records<R> {
        Records { reader: self }
    }
}

/// Iterator over Format B records.
pub struct Records<R: BufRead> {
    reader: BedpeReader<R>,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read all Format B records from a file, surfacing the first error.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    BedpeReader::from_path(path)?.records().collect()
}

/// Parse Format B records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<RawRecord>> {
    BedpeReader::new(content.as_bytes()).records().collect()
}
