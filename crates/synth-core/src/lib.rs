//! Core types for the worldsynth game-data generator.
//!
//! This crate provides the foundational types shared by the generator,
//! the event sampler, and the output writers:
//!
//! - [`EntitySchema`] - Entity definitions loaded from YAML/JSON
//! - [`ValueCatalog`] - Named lists of candidate values
//! - [`FieldValue`] / [`Record`] / [`RecordPool`] - Generated data
//! - [`GenerationConfig`] - Run configuration
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    ├─── synth-generator  (field resolver + record generator)
//!    ├─── synth-events     (relation table + event sampler)
//!    └─── synth-output     (entity and event dump writers)
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::{EntityType, FieldValue, Record};
//!
//! let record = Record::builder()
//!     .field("id", FieldValue::Int(1))
//!     .field("name", FieldValue::Text("Ada".to_string()))
//!     .build();
//!
//! assert_eq!(record.get("id"), Some(&FieldValue::Int(1)));
//! assert_eq!(EntityType::Enemy.key_bucket(), EntityType::Npc);
//! ```

pub mod catalog;
pub mod config;
pub mod schema;
pub mod values;

// Re-exports for convenience
pub use catalog::{CatalogError, ValueCatalog};
pub use config::{ConfigError, GenerationConfig, KeyPolicy, SamplingLimits, TimeWindow};
pub use schema::{DataType, EntityDefinition, EntitySchema, EntityType, FieldRole, FieldSpec, SchemaError};
pub use values::{format_iso, FieldValue, Record, RecordBuilder, RecordPool, Resolution};
