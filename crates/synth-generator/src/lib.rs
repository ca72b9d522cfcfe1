//! Record generator for the worldsynth game-data generator.
//!
//! This crate turns entity definitions into record pools. Each field is
//! resolved independently by the [`FieldResolver`]; primary keys come from
//! the run-scoped [`KeyAllocator`].
//!
//! # Architecture
//!
//! ```text
//! EntitySchema + ValueCatalog
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ RecordGenerator  │
//! │                  │
//! │  - FieldResolver │
//! │  - KeyAllocator  │
//! └────────┬─────────┘
//!          │
//!          ▼
//!    RecordPool { name, entity_type, records }
//! ```
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use synth_core::{EntityDefinition, EntityType, FieldSpec, GenerationConfig, ValueCatalog};
//! use synth_generator::RecordGenerator;
//!
//! let catalog = ValueCatalog::builtin();
//! let config = GenerationConfig::default();
//! let mut generator = RecordGenerator::new(&catalog, &config);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let races = EntityDefinition::new(
//!     "Races",
//!     EntityType::Npc,
//!     vec![FieldSpec::primary_key("id"), FieldSpec::from_source("race", "race_names")],
//! );
//! let pool = generator.generate(&races, &mut rng).unwrap();
//! assert!(pool.len() >= 50);
//! ```
//!
//! # Scalar generators
//!
//! - `int` - uniform integer in 1..=1000
//! - `float` - uniform real in 1.0..=1000.0, rounded to 2 decimals
//! - `string` - word-like string of 3 to 8 phoneme units
//! - `datetime` - uniform timestamp in the configured window
//!
//! The [`audit`] module builds CRUD audit logs for players, quests, items
//! and guilds independently of any schema.

pub mod audit;
pub mod generator;
pub mod generators;
pub mod keys;
pub mod resolver;

// Re-exports for convenience
pub use audit::{AuditLog, AuditLogGenerator};
pub use generator::{GeneratorError, RecordGenerator};
pub use keys::KeyAllocator;
pub use resolver::FieldResolver;
