//! Folding of structurally identical blocks into one record with several aliases.

use std::hash::BuildHasher;

use hashbrown::HashMap;
use hashbrown::hash_map::DefaultHashBuilder;

use crate::record::BlockRecord;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Kept as a new record at this position.
    Added(usize),
    /// Aliases appended to the existing record at this position.
    Merged(usize),
}

/// Records in first-discovered order, bucketed by a structural hash of
/// `(properties, states)`. Hash hits are confirmed with a full comparison.
#[derive(Default)]
pub struct AliasResolver {
    records: Vec<BlockRecord>,
    buckets: HashMap<u64, Vec<usize>>,
    hasher: DefaultHashBuilder,
}

impl AliasResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: BlockRecord) -> MergeOutcome {
        let key = self
            .hasher
            .hash_one((&record.properties, &record.states));
        let bucket = self.buckets.entry(key).or_default();
        if let Some(&i) = bucket
            .iter()
            .find(|&&i| self.records[i].same_structure(&record))
        {
            self.records[i].names.extend(record.names);
            return MergeOutcome::Merged(i);
        }
        let i = self.records.len();
        bucket.push(i);
        self.records.push(record);
        MergeOutcome::Added(i)
    }

    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<BlockRecord> {
        self.records
    }
}
