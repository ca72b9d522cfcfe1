//! Field resolution: one field spec in, one value out.

use crate::generators::generate_scalar;
use crate::keys::KeyAllocator;
use rand::Rng;
use synth_core::{CatalogError, EntityType, FieldSpec, FieldValue, Resolution, TimeWindow, ValueCatalog};

/// Resolves field specs against a value catalog and a time window.
///
/// Dispatch order:
/// 1. `role: primary_key` - next key from the [`KeyAllocator`]
/// 2. `value_source` - uniform pick from the catalog (unknown names fail)
/// 3. otherwise - random scalar for the field's datatype
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    catalog: &'a ValueCatalog,
    window: &'a TimeWindow,
}

impl<'a> FieldResolver<'a> {
    pub fn new(catalog: &'a ValueCatalog, window: &'a TimeWindow) -> Self {
        Self { catalog, window }
    }

    /// Resolve a single field of a record of `entity_type`.
    pub fn resolve<R: Rng>(
        &self,
        field: &FieldSpec,
        entity_type: EntityType,
        keys: &mut KeyAllocator,
        rng: &mut R,
    ) -> Result<Resolution, CatalogError> {
        if field.is_primary_key() {
            return Ok(Resolution::Resolved(keys.next_key(entity_type, rng)));
        }

        if let Some(source) = &field.value_source {
            let value = self.catalog.sample(source, rng)?;
            return Ok(Resolution::Resolved(FieldValue::Text(value.to_string())));
        }

        Ok(generate_scalar(&field.datatype, rng, self.window))
    }
}
