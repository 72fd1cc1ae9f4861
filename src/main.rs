//! Command-line front end for the rowbench harness.
//!
//! Reads the numeric knobs, clamps them to their documented bounds, runs
//! the requested suite or batch, and prints one status line per
//! (runner, case) slot. Logging goes through `tracing`; set `RUST_LOG`
//! to adjust verbosity.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rowbench::{BenchCase, Harness, RunConfig, RunnerKey};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rowbench", version, about = "Compare list-renderer timings under deterministic mutation sequences")]
struct Cli {
    #[command(flatten)]
    knobs: Knobs,

    #[command(subcommand)]
    command: Command,
}

/// Numeric run configuration; out-of-range values are clamped, not
/// rejected.
#[derive(Debug, Args)]
struct Knobs {
    /// Number of list rows to mount (minimum 100).
    #[arg(long, global = true, default_value_t = 1200)]
    count: usize,

    /// Repeated mount/measure/teardown cycles (1-10).
    #[arg(long, global = true, default_value_t = 3)]
    runs: usize,

    /// Measured update cycles per run (1-100).
    #[arg(long, global = true, default_value_t = 20)]
    updates: usize,

    /// Value-update steps per mutation (1-count).
    #[arg(long, global = true, default_value_t = 50)]
    mutate_count: usize,

    /// Explicit base seed; derived from the configuration when omitted.
    #[arg(long, global = true)]
    seed: Option<u32>,

    /// Discarded warm-up cycles before the measured updates.
    #[arg(long, global = true, default_value_t = 1)]
    warmup: usize,
}

impl Knobs {
    fn config(&self) -> RunConfig {
        RunConfig {
            count: self.count,
            runs: self.runs,
            updates: self.updates,
            mutate_count: self.mutate_count,
            seed: self.seed,
            warmup: self.warmup,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one renderer under one mutation case.
    Run {
        /// Which renderer adapter to drive.
        #[arg(long, value_enum)]
        runner: RunnerKey,

        /// Which mutation strategy to exercise.
        #[arg(long, value_enum, default_value_t = BenchCase::Update)]
        case: BenchCase,
    },
    /// Run both renderers under both mutation cases.
    RunAll,
    /// Run both renderers under the splice case only.
    SpliceAll,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.knobs.config();
    let harness = Harness::new();

    let outcome = match cli.command {
        Command::Run { runner, case } => harness.run(runner, case, config).map(|r| r.is_some()),
        Command::RunAll => harness
            .run_batch(&BenchCase::ALL, config)
            .map(|r| r.is_some()),
        Command::SpliceAll => harness
            .run_batch(&[BenchCase::Splice], config)
            .map(|r| r.is_some()),
    };

    print_statuses(&harness);
    match outcome {
        Ok(true) => Ok(()),
        // Unreachable with a fresh harness, but the contract is that a
        // busy harness rejects rather than queues.
        Ok(false) => anyhow::bail!("harness was busy, nothing measured"),
        Err(err) => Err(err.into()),
    }
}

fn print_statuses(harness: &Harness) {
    for ((key, case), status) in harness.statuses() {
        println!("{key}/{case}: {status}");
    }
}
