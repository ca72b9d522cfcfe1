//! CLI argument definitions for the generate command.

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use synth_core::{ConfigError, GenerationConfig, KeyPolicy, SamplingLimits, TimeWindow};

/// Default entity dump file name.
pub const ENTITIES_FILE: &str = "generated_entities.txt";

/// Default event dump file name.
pub const EVENTS_FILE: &str = "generated_events.txt";

/// Audit log file name, written only with `--audit-logs`.
pub const AUDIT_FILE: &str = "generated_audit_logs.json";

/// Primary-key policy choice for CLI.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum KeyPolicyChoice {
    /// Per-type increasing integers with gaps of 1 to 3
    #[default]
    Counter,
    /// Random v4 UUIDs derived from the run seed
    Uuid,
}

impl From<KeyPolicyChoice> for KeyPolicy {
    fn from(choice: KeyPolicyChoice) -> Self {
        match choice {
            KeyPolicyChoice::Counter => KeyPolicy::Counter,
            KeyPolicyChoice::Uuid => KeyPolicy::Uuid,
        }
    }
}

/// Arguments for `worldsynth generate`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to the entity schema (YAML or JSON)
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Extra value sources merged over the built-in catalog (YAML or JSON)
    #[arg(long, short = 'c')]
    pub catalog: Option<PathBuf>,

    /// Directory for generated_entities.txt and generated_events.txt
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of interaction events to attempt
    #[arg(long, default_value = "20000")]
    pub event_count: usize,

    /// Minimum records per entity definition
    #[arg(long, default_value = "50")]
    pub min_records: usize,

    /// Maximum records per entity definition
    #[arg(long, default_value = "200")]
    pub max_records: usize,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "WORLDSYNTH_SEED")]
    pub seed: Option<u64>,

    /// Primary-key policy
    #[arg(long, value_enum, default_value_t = KeyPolicyChoice::Counter)]
    pub key_policy: KeyPolicyChoice,

    /// Type-pair draws allowed per event before giving up
    #[arg(long, default_value = "1000")]
    pub max_draws_per_event: u32,

    /// Type-pair draws allowed for the whole run (default: per-event cap times event count)
    #[arg(long)]
    pub max_total_draws: Option<u64>,

    /// Start of the time window (ISO 8601 or YYYY-MM-DD)
    #[arg(long, default_value = "2021-01-01T00:00:00")]
    pub window_start: String,

    /// End of the time window (ISO 8601 or YYYY-MM-DD)
    #[arg(long, default_value = "2023-09-14T23:59:59")]
    pub window_end: String,

    /// Log a summary line for every generated pool
    #[arg(long)]
    pub print_summary: bool,

    /// Also write CRUD audit logs to generated_audit_logs.json
    #[arg(long)]
    pub audit_logs: bool,

    /// Base entry count for the audit logs
    #[arg(long, default_value_t = synth_generator::audit::DEFAULT_BASE_COUNT)]
    pub audit_base_count: usize,
}

impl GenerateArgs {
    /// Build the run configuration from the command-line values.
    pub fn generation_config(&self) -> Result<GenerationConfig, ConfigError> {
        let window = TimeWindow::parse(&self.window_start, &self.window_end)?;
        let sampling = SamplingLimits {
            max_draws_per_event: self.max_draws_per_event,
            max_total_draws: self.max_total_draws,
        };

        let mut config = GenerationConfig::new()
            .with_records_per_entity(self.min_records, self.max_records)?
            .with_event_count(self.event_count)
            .with_window(window)
            .with_key_policy(self.key_policy.into())
            .with_sampling(sampling);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }

    pub fn entities_path(&self) -> PathBuf {
        self.output_dir.join(ENTITIES_FILE)
    }

    pub fn events_path(&self) -> PathBuf {
        self.output_dir.join(EVENTS_FILE)
    }

    pub fn audit_path(&self) -> PathBuf {
        self.output_dir.join(AUDIT_FILE)
    }
}
