//! Command-line interface for worldsynth
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate records and events into the current directory
//! worldsynth generate --schema entities.yaml
//!
//! # Small, reproducible run with UUID primary keys
//! worldsynth generate --schema entities.yaml \
//!   --min-records 5 --max-records 10 --event-count 100 \
//!   --seed 42 --key-policy uuid --output-dir out
//!
//! # Restrict the time window used for datetime fields and events
//! worldsynth generate --schema entities.yaml \
//!   --window-start 2022-01-01 --window-end 2022-12-31T23:59:59
//! ```
//!
//! Set `RUST_LOG=debug` for per-pool detail.

use clap::{Parser, Subcommand};
use synth_output::GenerateArgs;
use worldsynth::run_generate;

#[derive(Parser)]
#[command(name = "worldsynth")]
#[command(about = "Generate fake game-world entities and interaction events")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate generated_entities.txt and generated_events.txt
    Generate(GenerateArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let summary = run_generate(args)?;
            tracing::info!(
                "Done: {} records, {} events ({} attempts dropped for empty pools)",
                summary.records_written,
                summary.events_written,
                summary.sampler.dropped_empty_pool
            );
            if summary.audit_path.is_some() {
                tracing::info!("Audit log: {} entries", summary.audit_entries_written);
            }
        }
    }

    Ok(())
}
