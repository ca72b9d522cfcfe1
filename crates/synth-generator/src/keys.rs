//! Primary-key allocation.
//!
//! `KeyAllocator` holds the per-bucket counters for one generation run. It
//! is created empty at the start of a run and dropped at the end, so runs
//! (and tests) never share key state.

use crate::generators::uuid::random_uuid;
use rand::Rng;
use std::collections::HashMap;
use synth_core::{EntityType, FieldValue, KeyPolicy};

/// Largest step between two consecutive counter keys in a bucket.
pub const MAX_KEY_STEP: i64 = 3;

/// Allocates primary keys under a single [`KeyPolicy`].
#[derive(Debug, Clone, Default)]
pub struct KeyAllocator {
    policy: KeyPolicy,
    counters: HashMap<EntityType, i64>,
}

impl KeyAllocator {
    pub fn new(policy: KeyPolicy) -> Self {
        Self {
            policy,
            counters: HashMap::new(),
        }
    }

    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Allocate the next key for a record of `entity_type`.
    ///
    /// Counter keys advance the bucket by a uniform step in `1..=3`, so
    /// keys are strictly increasing within a bucket and may have gaps.
    pub fn next_key<R: Rng>(&mut self, entity_type: EntityType, rng: &mut R) -> FieldValue {
        match self.policy {
            KeyPolicy::Counter => {
                let counter = self.counters.entry(entity_type.key_bucket()).or_insert(0);
                *counter += rng.gen_range(1..=MAX_KEY_STEP);
                FieldValue::Int(*counter)
            }
            KeyPolicy::Uuid => FieldValue::Uuid(random_uuid(rng)),
        }
    }

    /// Last counter key issued in the bucket that `entity_type` maps to.
    pub fn last_key(&self, entity_type: EntityType) -> Option<i64> {
        self.counters.get(&entity_type.key_bucket()).copied()
    }
}
