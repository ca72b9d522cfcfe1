//! Output files for the worldsynth game-data generator.
//!
//! This crate holds the `generate` command's CLI arguments and the
//! dedicated writers: the entity dump (`generated_entities.txt`), the
//! event dump (`generated_events.txt`) and the optional audit log
//! (`generated_audit_logs.json`).
//!
//! # Example
//!
//! ```ignore
//! use synth_output::{EntityDumpWriter, EventDumpWriter};
//!
//! let metrics = EntityDumpWriter::new().write("generated_entities.txt", &pools, &mut rng)?;
//! EventDumpWriter::new().write("generated_events.txt", &events)?;
//! println!("Wrote {} records in {:?}", metrics.items_written, metrics.duration);
//! ```

pub mod args;
pub mod error;
pub mod render;
pub mod writer;

pub use args::{GenerateArgs, KeyPolicyChoice, AUDIT_FILE, ENTITIES_FILE, EVENTS_FILE};
pub use error::OutputError;
pub use writer::{AuditLogWriter, EntityDumpWriter, EventDumpWriter, StagedFile, WriteMetrics};
