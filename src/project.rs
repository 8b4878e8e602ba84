//! 5'-end projection: turn grouped intervals into per-group tag vectors.
//!
//! Projection consumes the [`IntervalStore`] by value. Each group is moved
//! out of the store, optionally sorted and deduplicated, projected to 5'
//! coordinates, and its memory released before the next group is touched.
//! Taking the store by value makes the single-use contract a compile-time
//! fact: no alias can observe a partially-drained store.

use crate::interval::Interval;
use crate::store::{IntervalStore, TagStore};

/// Sort intervals by (start, end) so that exact duplicates are adjacent.
pub fn sort_by_start_end(intervals: &mut [Interval]) {
    intervals.sort_unstable();
}

/// Remove every interval equal to its immediate predecessor.
///
/// This is deliberately an adjacent filter, not a set: only neighbors are
/// compared, so it removes all exact duplicates exactly when the slice was
/// sorted by the same (start, end) key first. Keep the two steps coupled.
pub fn dedup_adjacent(intervals: &mut Vec<Interval>) {
    intervals.dedup_by(|a, b| a.start == b.start && a.end == b.end);
}

/// Project every group of `store` to its 5' coordinates.
///
/// With `drop_duplicates` set, each group is sorted by (start, end) and
/// exact adjacent duplicates are removed before projection; otherwise the
/// group is projected in pure ingestion order with duplicates retained.
/// Tags are the interval start on the '+' strand and the internal closed
/// end on every other strand.
pub fn project(store: IntervalStore, drop_duplicates: bool) -> TagStore {
    let mut tags = TagStore::new();

    for (key, mut intervals) in store {
        if drop_duplicates {
            sort_by_start_end(&mut intervals);
            dedup_adjacent(&mut intervals);
        }

        let strand = key.strand;
        let group_tags: Vec<u32> = intervals
            .iter()
            .map(|iv| iv.five_prime(strand))
            .collect();

        tags.insert(key, group_tags);
    }

    tags
}

/// Ingest a record source and project it in one call.
pub fn load_and_project<I>(source: I, drop_duplicates: bool) -> TagStore
where
    I: IntoIterator<Item = crate::interval::RawRecord>,
{
    project(crate::store::ingest(source), drop_duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::{GroupKey, RawRecord, Strand};
    use crate::store::ingest;

    fn rec(chrom: &str, start: u32, end: u32, strand: char) -> RawRecord {
        RawRecord::new(chrom, start, end, Strand::from_char(strand))
    }

    fn key(chrom: &str, strand: char) -> GroupKey {
        GroupKey::new(chrom, Strand::from_char(strand))
    }

    #[test]
    fn test_plus_strand_projects_start() {
        let tags = load_and_project(vec![rec("chr1", 100, 200, '+')], false);
        assert_eq!(tags.get(&key("chr1", '+')).unwrap(), &[100]);
    }

    #[test]
    fn test_minus_strand_projects_adjusted_end() {
        let tags = load_and_project(vec![rec("chr1", 100, 200, '-')], false);
        assert_eq!(tags.get(&key("chr1", '-')).unwrap(), &[199]);
    }

    #[test]
    fn test_unknown_strand_behaves_like_minus() {
        let tags = load_and_project(vec![rec("chr1", 100, 200, '.')], false);
        assert_eq!(tags.get(&key("chr1", '.')).unwrap(), &[199]);
    }

    #[test]
    fn test_no_dedup_keeps_ingestion_order() {
        let tags = load_and_project(
            vec![
                rec("chr1", 500, 600, '+'),
                rec("chr1", 100, 200, '+'),
                rec("chr1", 300, 400, '+'),
            ],
            false,
        );
        assert_eq!(tags.get(&key("chr1", '+')).unwrap(), &[500, 100, 300]);
    }

    #[test]
    fn test_dedup_sorts_by_start_then_end() {
        let tags = load_and_project(
            vec![
                rec("chr1", 300, 400, '+'),
                rec("chr1", 100, 250, '+'),
                rec("chr1", 100, 200, '+'),
            ],
            true,
        );
        // Sorted on the internal closed ends: (100,199), (100,249), (300,399).
        assert_eq!(tags.get(&key("chr1", '+')).unwrap(), &[100, 100, 300]);
    }

    #[test]
    fn test_dedup_drops_exact_duplicates_only() {
        let tags = load_and_project(
            vec![
                rec("chr1", 10, 21, '+'),
                rec("chr1", 10, 21, '+'),
                rec("chr1", 10, 30, '+'),
            ],
            true,
        );
        // Same start, different end: not a duplicate.
        assert_eq!(tags.get(&key("chr1", '+')).unwrap(), &[10, 10]);
    }

    #[test]
    fn test_duplicates_kept_without_dedup() {
        let tags = load_and_project(
            vec![rec("chr1", 10, 21, '+'), rec("chr1", 10, 21, '+')],
            false,
        );
        assert_eq!(tags.get(&key("chr1", '+')).unwrap(), &[10, 10]);
    }

    #[test]
    fn test_nonadjacent_duplicates_removed_after_sort() {
        // Duplicates separated at ingestion become adjacent under the sort.
        let tags = load_and_project(
            vec![
                rec("chr1", 10, 21, '-'),
                rec("chr1", 50, 61, '-'),
                rec("chr1", 10, 21, '-'),
            ],
            true,
        );
        assert_eq!(tags.get(&key("chr1", '-')).unwrap(), &[20, 60]);
    }

    #[test]
    fn test_tag_count_never_exceeds_interval_count() {
        let records = vec![
            rec("chr1", 1, 10, '+'),
            rec("chr1", 1, 10, '+'),
            rec("chr1", 5, 10, '+'),
            rec("chr2", 1, 10, '-'),
        ];

        let full = load_and_project(records.clone(), false);
        let deduped = load_and_project(records.clone(), true);

        let store = ingest(records);
        for (k, ivs) in store.iter() {
            assert_eq!(full.get(k).unwrap().len(), ivs.len());
            assert!(deduped.get(k).unwrap().len() <= ivs.len());
        }
    }

    #[test]
    fn test_groups_are_independent() {
        let tags = load_and_project(
            vec![
                rec("chr1", 100, 200, '+'),
                rec("chr1", 100, 200, '-'),
                rec("chr2", 100, 200, '+'),
            ],
            true,
        );
        assert_eq!(tags.len(), 3);
        assert_eq!(tags.get(&key("chr1", '+')).unwrap(), &[100]);
        assert_eq!(tags.get(&key("chr1", '-')).unwrap(), &[199]);
        assert_eq!(tags.get(&key("chr2", '+')).unwrap(), &[100]);
    }

    #[test]
    fn test_inverted_interval_passes_through() {
        // start > end after adjustment; no validation, strand picks the branch.
        let tags = load_and_project(vec![rec("chr1", 50, 20, '-')], false);
        assert_eq!(tags.get(&key("chr1", '-')).unwrap(), &[19]);
    }

    #[test]
    fn test_dedup_helpers_compose() {
        let mut ivs = vec![
            Interval::new(10, 20),
            Interval::new(5, 8),
            Interval::new(10, 20),
        ];
        sort_by_start_end(&mut ivs);
        dedup_adjacent(&mut ivs);
        assert_eq!(ivs, vec![Interval::new(5, 8), Interval::new(10, 20)]);
    }

    #[test]
    fn test_dedup_adjacent_alone_only_touches_neighbors() {
        // Without the sort, separated duplicates survive.
        let mut ivs = vec![
            Interval::new(10, 20),
            Interval::new(5, 8),
            Interval::new(10, 20),
        ];
        dedup_adjacent(&mut ivs);
        assert_eq!(ivs.len(), 3);
    }
}
