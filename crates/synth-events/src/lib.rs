//! Interaction-event sampling for the worldsynth game-data generator.
//!
//! Events pair two generated records whose entity types are related in a
//! fixed, directional relation table. Some verbs pull in a third record
//! (a dialogue for `Talked`, an item for `Bought From` and `Sold To`).
//!
//! # Architecture
//!
//! ```text
//! [RecordPool] ──► PoolIndex ──► EventSampler ──► Vec<EventRecord>
//!                                    │
//!                                    ▼
//!                              relation table
//! ```
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use synth_core::{EntityType, FieldValue, GenerationConfig, Record, RecordPool};
//! use synth_events::EventSampler;
//!
//! let record = |id| Record::builder().field("id", FieldValue::Int(id)).build();
//! let pools = vec![
//!     RecordPool::new("Players", EntityType::Player, vec![record(1), record(2)]),
//!     RecordPool::new("Guilds", EntityType::Guild, vec![record(1)]),
//! ];
//! let config = GenerationConfig::default();
//! let mut sampler = EventSampler::new(&pools, &config)
//!     .with_drawable(vec![EntityType::Player, EntityType::Guild]);
//!
//! let events = sampler.run(10, &mut StdRng::seed_from_u64(42)).unwrap();
//! assert!(events.iter().all(|e| e.label == "player_with_guild"));
//! ```

pub mod event;
pub mod pools;
pub mod relation;
pub mod sampler;

pub use event::EventRecord;
pub use pools::PoolIndex;
pub use relation::{is_compatible, relation, verbs, Relation};
pub use sampler::{EventSampler, SampleOutcome, SamplerStats, SamplingError};
