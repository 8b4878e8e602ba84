//! fiveprime: strand-aware 5' tag projection for genomic intervals.
//!
//! Reads single-interval (BED-style) or paired-interval (BEDPE-style)
//! records, plain or gzip-compressed, groups them by (chromosome, strand),
//! and reduces every interval to its 5'-end coordinate.
//!
//! # Pipeline
//!
//! Two strictly sequential phases:
//!
//! 1. **Ingest**: one pass over a record source builds an [`IntervalStore`],
//!    appending each interval to its (chromosome, strand) group. Source
//!    half-open ends are converted to closed internal ends on the way in.
//! 2. **Project**: [`project`] consumes the store by value and emits a
//!    [`TagStore`] with one coordinate per surviving interval — the start
//!    on the '+' strand, the closed end on every other strand. Optional
//!    deduplication sorts each group by (start, end) and removes adjacent
//!    exact duplicates first.
//!
//! # Example
//!
//! ```rust
//! use fiveprime::{bed, load_and_project, GroupKey, Strand};
//!
//! let records = bed::parse_records("chr1\t100\t200\tread1\t60\t+\n").unwrap();
//! let tags = load_and_project(records, true);
//!
//! let key = GroupKey::new("chr1", Strand::Plus);
//! assert_eq!(tags.get(&key).unwrap(), &[100]);
//! ```

pub mod bed;
pub mod bedpe;
pub mod interval;
pub mod io;
pub mod project;
pub mod store;

// Re-export commonly used types
pub use interval::{GroupKey, Interval, RawRecord, Strand};
pub use project::{load_and_project, project};
pub use store::{ingest, IntervalStore, TagStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{truncate_on_error, BedReader, ReadError};
    pub use crate::bedpe::BedpeReader;
    pub use crate::interval::{GroupKey, Interval, RawRecord, Strand};
    pub use crate::project::{load_and_project, project};
    pub use crate::store::{ingest, IntervalStore, TagStore};
}
