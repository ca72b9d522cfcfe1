//! Generate command handler.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use synth_core::{EntitySchema, RecordPool, ValueCatalog};
use synth_events::{EventSampler, SamplerStats};
use synth_generator::{AuditLogGenerator, RecordGenerator};
use synth_output::{AuditLogWriter, EntityDumpWriter, EventDumpWriter, GenerateArgs, StagedFile};
use tracing::info;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub entities_path: PathBuf,
    pub events_path: PathBuf,
    pub records_written: u64,
    pub events_written: u64,
    /// Set when audit logs were requested
    pub audit_path: Option<PathBuf>,
    pub audit_entries_written: u64,
    pub sampler: SamplerStats,
}

/// Run the generate command.
///
/// Everything that can fail on bad input (schema, catalog, window, value
/// sources, sampling budget) fails before any output file is created.
/// Output files are staged as `.tmp` siblings and renamed only after all
/// of them were written.
pub fn run_generate(args: GenerateArgs) -> anyhow::Result<GenerateSummary> {
    info!("Generating game-world data...");
    info!("Schema: {:?}", args.schema);

    let config = args
        .generation_config()
        .context("Invalid generation settings")?;

    let schema = EntitySchema::from_file(&args.schema)
        .with_context(|| format!("Failed to load schema file: {:?}", args.schema))?;

    let mut catalog = ValueCatalog::builtin();
    if let Some(path) = &args.catalog {
        let extra = ValueCatalog::from_file(path)
            .with_context(|| format!("Failed to load value catalog: {path:?}"))?;
        info!("Loaded {} value sources from {:?}", extra.len(), path);
        catalog = catalog.merge(extra);
    }

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // Phase 1: entity records
    let pools = RecordGenerator::new(&catalog, &config)
        .generate_all(&schema, &mut rng)
        .context("Failed to generate entity records")?;

    if args.print_summary {
        log_pool_summary(&pools);
    }

    // Phase 2: interaction events
    let mut sampler = EventSampler::new(&pools, &config);
    let events = sampler
        .run(config.event_count, &mut rng)
        .context("Failed to sample interaction events")?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", args.output_dir))?;

    // Phase 3: stage every file, then move them all into place
    let entities_path = args.entities_path();
    let staged_entities = EntityDumpWriter::new()
        .stage(&entities_path, &pools, &mut rng)
        .with_context(|| format!("Failed to write {}", entities_path.display()))?;

    let events_path = args.events_path();
    let staged_events = EventDumpWriter::new()
        .stage(&events_path, &events)
        .with_context(|| format!("Failed to write {}", events_path.display()))?;

    let staged_audit = if args.audit_logs {
        let audit = AuditLogGenerator::new(&config.window)
            .with_base_count(args.audit_base_count)
            .generate(&mut rng);
        let audit_path = args.audit_path();
        let staged = AuditLogWriter::new()
            .stage(&audit_path, &audit)
            .with_context(|| format!("Failed to write {}", audit_path.display()))?;
        Some(staged)
    } else {
        None
    };

    let records_written = commit(staged_entities)?;
    let events_written = commit(staged_events)?;
    let (audit_path, audit_entries_written) = match staged_audit {
        Some(staged) => {
            let path = staged.target().to_path_buf();
            (Some(path), commit(staged)?)
        }
        None => (None, 0),
    };

    Ok(GenerateSummary {
        entities_path,
        events_path,
        records_written,
        events_written,
        audit_path,
        audit_entries_written,
        sampler: sampler.stats().clone(),
    })
}

/// Rename a staged file over its target and return the item count.
fn commit(staged: StagedFile) -> anyhow::Result<u64> {
    let target = staged.target().to_path_buf();
    let metrics = staged
        .commit()
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!("Generated: {}", target.display());
    Ok(metrics.items_written)
}

/// Log one line per pool: name, type, record count and field names.
fn log_pool_summary(pools: &[RecordPool]) {
    for pool in pools {
        let fields = pool
            .records
            .first()
            .map(|record| record.field_names().join(", "))
            .unwrap_or_default();
        info!(
            "{:<20} {:<10} {:>6} records  [{}]",
            pool.name,
            pool.entity_type.as_str(),
            pool.len(),
            fields
        );
    }
}
