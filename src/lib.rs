//! Deterministic benchmark harness comparing two list-rendering
//! strategies.
//!
//! rowbench mounts equivalent list UIs under two renderer adapters, a
//! fine-grained reactive backend (futures-signals) and a buffer-diffing
//! backend (ratatui), drives both with identical deterministic mutation
//! sequences, and reports per-phase timing statistics for mount, update,
//! and teardown.
//!
//! # Architecture
//!
//! - [`rng`]: seeded LCG; the reproducibility foundation.
//! - [`data`]: benchmark items and the two mutation strategies
//!   (value updates and alternating insert/remove splices).
//! - [`stats`]: nearest-rank summary statistics over duration samples.
//! - [`config`]: run configuration, clamping, and base-seed derivation.
//! - [`runner`]: the adapter contract and the two concrete backends.
//! - [`harness`]: run sequencing, timing windows, busy guarding, and
//!   report formatting.
//!
//! # Example
//!
//! ```
//! use rowbench::{BenchCase, Harness, RunConfig, RunnerKey};
//!
//! let harness = Harness::new();
//! let config = RunConfig {
//!     count: 100,
//!     runs: 1,
//!     updates: 2,
//!     ..RunConfig::default()
//! };
//! let report = harness
//!     .run(RunnerKey::Diffed, BenchCase::Update, config)?
//!     .expect("harness was idle");
//! assert_eq!(report.update.count, 2);
//! # Ok::<(), rowbench::HarnessError>(())
//! ```

pub mod config;
pub mod data;
pub mod harness;
pub mod rng;
pub mod runner;
pub mod stats;

pub use config::RunConfig;
pub use data::{create_items, BenchCase, Item, Mutator, SpliceMutator, ValueMutator};
pub use harness::{Harness, HarnessError, RunReport, RunStatus};
pub use rng::Lcg;
pub use runner::{Runner, RunnerError, RunnerHandle, RunnerKey};
pub use stats::{summarize, StatSummary};
