//! Record generator for producing per-entity record pools.

use crate::keys::KeyAllocator;
use crate::resolver::FieldResolver;
use rand::Rng;
use std::collections::HashSet;
use synth_core::{
    CatalogError, ConfigError, EntityDefinition, EntitySchema, FieldValue, GenerationConfig, Record,
    RecordPool, Resolution, SchemaError, ValueCatalog,
};
use tracing::{debug, info, warn};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Schema failed validation
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration cannot be generated from
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A field's value source could not be used
    #[error("Entity '{entity}', field '{field}': {source}")]
    Catalog {
        entity: String,
        field: String,
        #[source]
        source: CatalogError,
    },
}

/// Generates record pools for entity definitions.
///
/// The generator owns the run's [`KeyAllocator`]; the RNG is borrowed so
/// the same seeded stream can continue into event sampling.
pub struct RecordGenerator<'a> {
    /// Value sources for `value_source` fields
    catalog: &'a ValueCatalog,
    /// Record count bounds, time window and key policy
    config: &'a GenerationConfig,
    /// Primary-key counters for this run
    keys: KeyAllocator,
    /// (entity, field) pairs already reported as unsupported
    warned: HashSet<(String, String)>,
}

impl<'a> RecordGenerator<'a> {
    /// Create a generator with fresh key counters.
    pub fn new(catalog: &'a ValueCatalog, config: &'a GenerationConfig) -> Self {
        Self {
            catalog,
            config,
            keys: KeyAllocator::new(config.key_policy),
            warned: HashSet::new(),
        }
    }

    /// Key allocator state (last issued key per bucket).
    pub fn keys(&self) -> &KeyAllocator {
        &self.keys
    }

    /// Validate the schema, then generate one pool per definition in order.
    ///
    /// Nothing is generated when validation fails.
    pub fn generate_all<R: Rng>(
        &mut self,
        schema: &EntitySchema,
        rng: &mut R,
    ) -> Result<Vec<RecordPool>, GeneratorError> {
        schema.validate()?;

        let pools = schema
            .entities
            .iter()
            .map(|entity| self.generate(entity, rng))
            .collect::<Result<Vec<_>, _>>()?;

        let total: usize = pools.iter().map(RecordPool::len).sum();
        info!(
            "Generated {} records across {} entity definitions",
            total,
            pools.len()
        );

        Ok(pools)
    }

    /// Generate a pool for one entity definition.
    ///
    /// The record count is drawn uniformly from the configured bounds and
    /// every field is resolved in declaration order.
    pub fn generate<R: Rng>(
        &mut self,
        entity: &EntityDefinition,
        rng: &mut R,
    ) -> Result<RecordPool, GeneratorError> {
        let config = self.config;
        let range = config.records_per_entity.clone();
        if range.is_empty() || *range.start() == 0 {
            return Err(ConfigError::InvalidRecordRange {
                min: *range.start(),
                max: *range.end(),
            }
            .into());
        }
        let count = rng.gen_range(range);
        let resolver = FieldResolver::new(self.catalog, &config.window);

        for field in &entity.fields {
            if field.is_primary_key() && field.value_source.is_some() {
                debug!(
                    "Field '{}.{}' is a primary key; ignoring its value source",
                    entity.name, field.name
                );
            }
        }

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let mut builder = Record::builder();
            for field in &entity.fields {
                let resolution = resolver
                    .resolve(field, entity.entity_type, &mut self.keys, rng)
                    .map_err(|source| GeneratorError::Catalog {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                        source,
                    })?;

                let value = match resolution {
                    Resolution::Resolved(value) => value,
                    Resolution::Unsupported(datatype) => {
                        if self.warned.insert((entity.name.clone(), field.name.clone())) {
                            warn!(
                                "Field '{}.{}' has unsupported datatype '{}'; writing null",
                                entity.name, field.name, datatype
                            );
                        }
                        FieldValue::Null
                    }
                };
                builder.push(field.name.clone(), value);
            }
            records.push(builder.build());
        }

        debug!(
            "Generated {} records for '{}' ({})",
            records.len(),
            entity.name,
            entity.entity_type
        );

        Ok(RecordPool::new(&entity.name, entity.entity_type, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use synth_core::{DataType, EntityType, FieldSpec, KeyPolicy};

    fn full_schema() -> EntitySchema {
        let mut entities: Vec<EntityDefinition> = EntityType::REQUIRED
            .iter()
            .map(|t| {
                EntityDefinition::new(
                    format!("{t}s"),
                    *t,
                    vec![
                        FieldSpec::primary_key("id"),
                        FieldSpec::new("level", DataType::Int),
                    ],
                )
            })
            .collect();
        entities[0] = EntityDefinition::new(
            "Players",
            EntityType::Player,
            vec![
                FieldSpec::primary_key("id"),
                FieldSpec::from_source("name", "first_names"),
                FieldSpec::new("gold", DataType::Float),
                FieldSpec::new("joined", DataType::DateTime),
                FieldSpec::new("handle", DataType::String),
            ],
        );
        EntitySchema::new(entities)
    }

    fn catalog() -> ValueCatalog {
        let mut catalog = ValueCatalog::new();
        catalog.insert("first_names", vec!["Ada".to_string(), "Bo".to_string()]);
        catalog
    }

    #[test]
    fn test_record_count_in_bounds() {
        let catalog = catalog();
        let config = GenerationConfig::default();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let pools = generator.generate_all(&full_schema(), &mut rng).unwrap();

        assert_eq!(pools.len(), 8);
        for pool in &pools {
            assert!((50..=200).contains(&pool.len()), "{} has {}", pool.name, pool.len());
        }
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let catalog = catalog();
        let config = GenerationConfig::default();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let schema = full_schema();
        let pool = generator.generate(&schema.entities[0], &mut rng).unwrap();

        for record in &pool.records {
            assert_eq!(
                record.field_names(),
                vec!["id", "name", "gold", "joined", "handle"]
            );
            assert!(matches!(record.get("gold"), Some(FieldValue::Float(_))));
            assert!(matches!(record.get("joined"), Some(FieldValue::DateTime(_))));
            assert!(matches!(record.get("handle"), Some(FieldValue::Text(_))));
        }
    }

    #[test]
    fn test_player_scenario_keys_and_names() {
        let catalog = catalog();
        let config = GenerationConfig::default();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let players = EntityDefinition::new(
            "Players",
            EntityType::Player,
            vec![
                FieldSpec::primary_key("id"),
                FieldSpec::from_source("name", "first_names"),
            ],
        );
        let pool = generator.generate(&players, &mut rng).unwrap();

        let mut previous = 0;
        for record in &pool.records {
            let id = record.get("id").and_then(FieldValue::as_i64).unwrap();
            assert!((1..=3).contains(&(id - previous)));
            previous = id;

            let name = record.get("name").and_then(FieldValue::as_str).unwrap();
            assert!(name == "Ada" || name == "Bo");
        }
        assert_eq!(generator.keys().last_key(EntityType::Player), Some(previous));
    }

    #[test]
    fn test_enemy_keys_continue_npc_bucket() {
        let catalog = catalog();
        let config = GenerationConfig::default();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let npcs = EntityDefinition::new("Npcs", EntityType::Npc, vec![FieldSpec::primary_key("id")]);
        let enemies =
            EntityDefinition::new("Enemies", EntityType::Enemy, vec![FieldSpec::primary_key("id")]);

        let npc_pool = generator.generate(&npcs, &mut rng).unwrap();
        let enemy_pool = generator.generate(&enemies, &mut rng).unwrap();

        let id_of = |record: &Record| record.get("id").and_then(FieldValue::as_i64).unwrap();
        let last_npc = id_of(npc_pool.records.last().unwrap());
        let first_enemy = id_of(&enemy_pool.records[0]);
        assert!((1..=3).contains(&(first_enemy - last_npc)));
    }

    #[test]
    fn test_missing_types_generate_nothing() {
        let catalog = catalog();
        let config = GenerationConfig::default();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let schema = EntitySchema::new(vec![EntityDefinition::new(
            "Players",
            EntityType::Player,
            vec![FieldSpec::primary_key("id")],
        )]);
        let result = generator.generate_all(&schema, &mut rng);

        assert!(matches!(
            result,
            Err(GeneratorError::Schema(SchemaError::MissingEntityTypes { .. }))
        ));
        assert_eq!(generator.keys().last_key(EntityType::Player), None);
    }

    #[test]
    fn test_unknown_source_names_entity_and_field() {
        let catalog = ValueCatalog::new();
        let config = GenerationConfig::default();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let err = generator.generate_all(&full_schema(), &mut rng).unwrap_err();
        match &err {
            GeneratorError::Catalog { entity, field, source } => {
                assert_eq!(entity, "Players");
                assert_eq!(field, "name");
                assert!(matches!(source, CatalogError::UnknownSource(_)));
            }
            other => panic!("Expected Catalog error, got {other:?}"),
        }
        assert!(err.to_string().contains("first_names"));
    }

    #[test]
    fn test_unsupported_datatype_writes_null() {
        let catalog = catalog();
        let config = GenerationConfig::default();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let items = EntityDefinition::new(
            "Items",
            EntityType::Item,
            vec![
                FieldSpec::primary_key("id"),
                FieldSpec::new("weight", DataType::Other("decimal".to_string())),
            ],
        );
        let pool = generator.generate(&items, &mut rng).unwrap();

        assert!(pool.records.iter().all(|r| r.get("weight") == Some(&FieldValue::Null)));
    }

    #[test]
    fn test_uuid_key_policy() {
        let catalog = catalog();
        let config = GenerationConfig::default().with_key_policy(KeyPolicy::Uuid);
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let guilds =
            EntityDefinition::new("Guilds", EntityType::Guild, vec![FieldSpec::primary_key("id")]);
        let pool = generator.generate(&guilds, &mut rng).unwrap();

        let ids: HashSet<_> = pool
            .records
            .iter()
            .map(|r| *r.get("id").and_then(FieldValue::as_uuid).unwrap())
            .collect();
        assert_eq!(ids.len(), pool.len());
    }

    #[test]
    fn test_deterministic_generation() {
        let catalog = catalog();
        let config = GenerationConfig::default();
        let schema = full_schema();

        let mut gen1 = RecordGenerator::new(&catalog, &config);
        let mut gen2 = RecordGenerator::new(&catalog, &config);
        let pools1 = gen1.generate_all(&schema, &mut StdRng::seed_from_u64(42)).unwrap();
        let pools2 = gen2.generate_all(&schema, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(pools1, pools2);
    }

    #[test]
    fn test_custom_record_range() {
        let catalog = catalog();
        let config = GenerationConfig::default()
            .with_records_per_entity(3, 3)
            .unwrap();
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let pools = generator.generate_all(&full_schema(), &mut rng).unwrap();
        assert!(pools.iter().all(|p| p.len() == 3));
    }

    #[test]
    fn test_unchecked_record_range_is_an_error() {
        let catalog = catalog();
        let mut config = GenerationConfig::default();
        config.records_per_entity = 5..=4;
        let mut generator = RecordGenerator::new(&catalog, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let result = generator.generate_all(&full_schema(), &mut rng);
        assert!(matches!(
            result,
            Err(GeneratorError::Config(ConfigError::InvalidRecordRange { min: 5, max: 4 }))
        ));

        config.records_per_entity = 0..=3;
        let mut generator = RecordGenerator::new(&catalog, &config);
        assert!(generator.generate_all(&full_schema(), &mut rng).is_err());
    }
}
