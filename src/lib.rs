//! worldsynth
//!
//! Generates fake game-world data for testing and demos: records for a
//! user-defined set of entity definitions (players, npcs, items, guilds
//! and so on) plus a stream of interaction events between them.
//!
//! # Crates
//!
//! - `synth_core` - schema, values, value catalog, run configuration
//! - `synth_generator` - field resolution, record generation, audit logs
//! - `synth_events` - relation table and event sampling
//! - `synth_output` - CLI arguments and the output writers
//!
//! # CLI Usage
//!
//! ```bash
//! # Default run: 50-200 records per entity, 20000 event attempts
//! worldsynth generate --schema entities.yaml
//!
//! # Reproducible run with extra value sources
//! worldsynth generate --schema entities.yaml --catalog names.yaml \
//!   --seed 42 --event-count 500 --output-dir out --print-summary
//!
//! # Also write generated_audit_logs.json
//! worldsynth generate --schema entities.yaml --audit-logs --audit-base-count 50
//! ```

pub mod generate;

pub use generate::{run_generate, GenerateSummary};
