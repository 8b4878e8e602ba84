//! Interval and tag stores keyed by (chromosome, strand).

use crate::interval::{GroupKey, Interval, RawRecord};
use rustc_hash::FxHashMap;

/// All ingested intervals, partitioned by [`GroupKey`].
///
/// Each group's vector is in pure ingestion order; nothing is sorted,
/// deduplicated, or validated here. The store is populated once and then
/// consumed by value by [`crate::project`], so a partially-drained store
/// can never be observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalStore {
    groups: FxHashMap<GroupKey, Vec<Interval>>,
}

impl IntervalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record to its group, creating the group if absent.
    #[inline]
    pub fn push(&mut self, record: RawRecord) {
        let (key, interval) = record.into_parts();
        self.groups.entry(key).or_default().push(interval);
    }

    /// Number of (chromosome, strand) groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of intervals across all groups.
    pub fn total_intervals(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[Interval]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[Interval])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl IntoIterator for IntervalStore {
    type Item = (GroupKey, Vec<Interval>);
    type IntoIter = <FxHashMap<GroupKey, Vec<Interval>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl FromIterator<RawRecord> for IntervalStore {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(records: I) -> Self {
        let mut store = Self::new();
        for record in records {
            store.push(record);
        }
        store
    }
}

/// The final artifact: one 5' coordinate per surviving interval,
/// partitioned by the same keys as the [`IntervalStore`] it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStore {
    groups: FxHashMap<GroupKey, Vec<u32>>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: GroupKey, tags: Vec<u32>) {
        self.groups.insert(key, tags);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of tags across all groups.
    pub fn total_tags(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[u32]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[u32])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Keys in sorted order, for deterministic output.
    pub fn sorted_keys(&self) -> Vec<&GroupKey> {
        let mut keys: Vec<&GroupKey> = self.groups.keys().collect();
        keys.sort();
        keys
    }
}

impl IntoIterator for TagStore {
    type Item = (GroupKey, Vec<u32>);
    type IntoIter = <FxHashMap<GroupKey, Vec<u32>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Build an [`IntervalStore`] from a record source in one pass.
///
/// One append per record; grouping is the only work done here.
pub fn ingest<I>(source: I) -> IntervalStore
where
    I: IntoIterator<Item = RawRecord>,
{
    source.into_iter().collect()
}
