//! Format A reader: 6-field single-interval records.
//!
//! Layout per line: `chrom start end name score strand`, whitespace
//! separated. Name and score are tokenized and discarded; only the
//! chromosome, the coordinate pair, and the strand reach the core.

use crate::interval::{RawRecord, Strand};
use log::warn;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading interval records.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, ReadError>;

/// A streaming reader for Format A records.
pub struct BedReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl BedReader<Box<dyn BufRead>> {
    /// Open a file, decoding gzip transparently.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(crate::io::open(path)?))
    }
}

impl<R: BufRead> BedReader<R> {
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

        if fields.len() < 6 {
            return Err(ReadError::Parse {
                line: self.line_number,
                message: format!("expected at least 6 fields, got {}", fields.len()),
            });
        }

        let start = parse_coord(fields[1], "start", self.line_number)?;
        let end = parse_coord(fields[2], "end", self.line_number)?;
        let strand = parse_strand(fields[5], self.line_number)?;

        Ok(RawRecord::new(fields[0], start, end, strand))
    }

    /// Iterator over all records, surfacing parse errors.
    pub fn records(self) -> Records<R> {
        Records { reader: self }
    }
}

/// Iterator over Format A records.
pub struct Records<R: BufRead> {
    reader: BedReader<R>,
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

pub(crate) fn parse_coord(s: &str, field_name: &str, line: usize) -> Result<u32> {
    s.parse().map_err(|_| ReadError::Parse {
        line,
        message: format!("invalid {} coordinate: '{}'", field_name, s),
    })
}

pub(crate) fn parse_strand(s: &str, line: usize) -> Result<Strand> {
    s.chars()
        .next()
        .map(Strand::from_char)
        .ok_or_else(|| ReadError::Parse {
            line,
            message: "empty strand field".to_string(),
        })
}

/// Adapter that stops at the first unreadable record.
///
/// Everything read up to that point is kept, mirroring how a raw token
/// stream simply goes quiet once a field fails to extract. The cut is
/// logged so truncated input does not pass entirely unnoticed.
pub struct TruncateOnError<I> {
    inner: Option<I>,
}

/// Wrap a fallible record iterator in the stop-at-first-error policy.
pub fn truncate_on_error<I>(records: I) -> TruncateOnError<I::IntoIter>
where
    I: IntoIterator<Item = Result<RawRecord>>,
{
    TruncateOnError {
        inner: Some(records.into_iter()),
    }
}

impl<I> Iterator for TruncateOnError<I>
where
    I: Iterator<Item = Result<RawRecord>>,
{
    type Item = RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.as_mut()?.next() {
            Some(Ok(record)) => Some(record),
            Some(Err(e)) => {
                warn!("stopping ingestion early: {}", e);
                self.inner = None;
                None
            }
            None => None,
        }
    }
}

/// Read all Format A records from a file, surfacing the first error.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    BedReader::from_path(path)?.records().collect()
}

/// Parse Format A records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<RawRecord>> {
    BedReader::new(content.as_bytes()).records().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_record() {
        let records = parse_records("chr1\t100\t200\tread1\t60\t+\n").unwrap();
        assert_eq!(records, vec![RawRecord::new("chr1", 100, 200, Strand::Plus)]);
    }

    #[test]
    fn test_name_and_score_ignored() {
        let a = parse_records("chr1\t100\t200\talpha\t0\t-\n").unwrap();
        let b = parse_records("chr1\t100\t200\tbeta\t999\t-\n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_space_separated_fields() {
        let records = parse_records("chr1 100 200 read1 60 +\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chrom, "chr1");
    }

    #[test]
    fn test_skip_comments_and_headers() {
        let content = "# header\ntrack name=test\nbrowser position chr1\n\nchr1\t100\t200\tr\t0\t+\n";
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_too_few_fields_is_error() {
        let result = parse_records("chr1\t100\t200\n");
        assert!(matches!(result, Err(ReadError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_bad_coordinate_is_error() {
        let result = parse_records("chr1\tabc\t200\tr\t0\t+\n");
        assert!(matches!(result, Err(ReadError::Parse { .. })));
    }

    #[test]
    fn test_error_reports_line_number() {
        let content = "chr1\t100\t200\tr\t0\t+\nchr1\tbad\t200\tr\t0\t+\n";
        match parse_records(content) {
            Err(ReadError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unusual_strand_accepted() {
        let records = parse_records("chr1\t100\t200\tr\t0\t.\n").unwrap();
        assert_eq!(records[0].strand, Strand::Other('.'));
    }

    #[test]
    fn test_truncate_on_error_keeps_prefix() {
        let content = "chr1\t100\t200\tr\t0\t+\nchr1\tbad\t200\tr\t0\t+\nchr1\t300\t400\tr\t0\t+\n";
        let reader = BedReader::new(content.as_bytes());
        let records: Vec<_> = truncate_on_error(reader.records()).collect();
        assert_eq!(records, vec![RawRecord::new("chr1", 100, 200, Strand::Plus)]);
    }

    #[test]
    fn test_truncate_on_error_passes_clean_input_through() {
        let content = "chr1\t100\t200\tr\t0\t+\nchr2\t300\t400\tr\t0\t-\n";
        let reader = BedReader::new(content.as_bytes());
        let records: Vec<_> = truncate_on_error(reader.records()).collect();
        assert_eq!(records.len(), 2);
    }
}
