//! Core types for interval aggregation: strands, group keys, and intervals.

use std::cmp::Ordering;
use std::fmt;

/// Strand orientation of a genomic feature.
///
/// Only `'+'` is ever treated specially downstream: projection uses the
/// interval start for `Plus` and the interval end for everything else, so
/// unrecognized strand characters behave like the minus strand. They are
/// still kept distinct for grouping purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strand {
    Plus,
    Minus,
    /// Any strand character other than '+' or '-'.
    Other(char),
}

impl Strand {
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            other => Strand::Other(other),
        }
    }

    /// True only for the '+' strand; the projection branch selector.
    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, Strand::Plus)
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Other(c) => *c,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A closed genomic coordinate range `[start, end]`.
///
/// The internal representation is closed-inclusive; sources hand over
/// half-open coordinates and the end is decremented once on the way in
/// (see [`Interval::from_half_open`]). No `start <= end` invariant is
/// enforced; inverted intervals from malformed input pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Convert a half-open `[start, end)` source range into the internal
    /// closed representation. An end of 0 saturates rather than wrapping.
    #[inline]
    pub fn from_half_open(start: u32, end: u32) -> Self {
        Self {
            start,
            end: end.saturating_sub(1),
        }
    }

    /// The 5' coordinate of this interval for the given strand: `start`
    /// on the forward strand, `end` otherwise.
    #[inline]
    pub fn five_prime(&self, strand: Strand) -> u32 {
        if strand.is_forward() {
            self.start
        } else {
            self.end
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.start, self.end)
    }
}

impl Ord for Interval {
    /// Order by start, then end. Equal intervals become adjacent under a
    /// sort, which is what the adjacent-duplicate filter relies on.
    fn cmp(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start).then(self.end.cmp(&other.end))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The (chromosome, strand) pair that partitions intervals.
///
/// Two records with the same chromosome and strand always land in the
/// same group regardless of arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub chrom: String,
    pub strand: Strand,
}

impl GroupKey {
    #[inline]
    pub fn new(chrom: impl Into<String>, strand: Strand) -> Self {
        Self {
            chrom: chrom.into(),
            strand,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.chrom, self.strand)
    }
}

/// The tuple-level contract between format readers and the core.
///
/// Coordinates are still in the source's half-open convention; the
/// closed-end adjustment happens at ingestion, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
}

impl RawRecord {
    pub fn new(chrom: impl Into<String>, start: u32, end: u32, strand: Strand) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
        }
    }

    /// Split the record into its grouping key and internal interval.
    #[inline]
    pub fn into_parts(self) -> (GroupKey, Interval) {
        let interval = Interval::from_half_open(self.start, self.end);
        (GroupKey::new(self.chrom, self.strand), interval)
    }
}
