//! Record pools merged by entity type.

use std::collections::BTreeMap;
use synth_core::{EntityType, Record, RecordPool};

/// Read-only view of all generated records, grouped by entity type.
///
/// Definitions that share a type tag are merged into one candidate list.
#[derive(Debug, Default)]
pub struct PoolIndex<'a> {
    by_type: BTreeMap<EntityType, Vec<&'a Record>>,
}

impl<'a> PoolIndex<'a> {
    pub fn new(pools: &'a [RecordPool]) -> Self {
        let mut by_type: BTreeMap<EntityType, Vec<&'a Record>> = BTreeMap::new();
        for pool in pools {
            by_type
                .entry(pool.entity_type)
                .or_default()
                .extend(pool.records.iter());
        }
        Self { by_type }
    }

    /// Records of the given type; empty when no definition declares it.
    pub fn records(&self, entity_type: EntityType) -> &[&'a Record] {
        self.by_type
            .get(&entity_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_records(&self, entity_type: EntityType) -> bool {
        !self.records(entity_type).is_empty()
    }

    /// Total records across all types.
    pub fn total(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }
}
