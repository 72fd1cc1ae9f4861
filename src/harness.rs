//! Benchmark orchestration: run sequencing, timing, and reporting.
//!
//! The harness owns the run configuration for the duration of a run and
//! the current item collection between steps. One suite drives a single
//! (runner, case) pair through `runs` repetitions of
//! mount → warmup → measured updates, with each repetition's teardown
//! timed separately, then folds the collected durations into summary
//! statistics. Batches drive both adapters back to back over literally
//! identical input.
//!
//! Only one suite may be running at a time. The busy flag is a simple
//! re-entrancy check: a run requested while another is in flight is a
//! no-op, not queued, and the flag is released on every exit path
//! including panics.

use crate::config::RunConfig;
use crate::data::{create_items, BenchCase, Item, Mutator};
use crate::runner::{Runner, RunnerError, RunnerHandle, RunnerKey};
use crate::stats::{summarize, StatSummary};
use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Errors that abort a benchmark run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A renderer adapter failed during mount or a measured update.
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
}

/// Per-phase summaries for one completed suite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// One sample per repetition, mount through first paint.
    pub mount: StatSummary,
    /// One sample per measured update, flattened across repetitions.
    pub update: StatSummary,
    /// One sample per repetition's teardown.
    pub cleanup: StatSummary,
}

impl RunReport {
    /// Format the informational status line for this report.
    pub fn format_line(&self, case: BenchCase, config: &RunConfig) -> String {
        format!(
            "mount avg {:.2} ms / {} med {:.2} ms (avg {:.2}, p95 {:.2}, σ {:.2}) / unmount avg {:.2} ms / (runs: {}, updates/run: {}, nodes: {})",
            self.mount.average,
            case.label(),
            self.update.median,
            self.update.average,
            self.update.p95,
            self.update.stddev,
            self.cleanup.average,
            config.runs,
            config.updates,
            config.count,
        )
    }
}

/// Lifecycle of one (runner, case) slot in the status registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing measured yet (also the state after a reset).
    NotMeasured,
    /// A suite is currently running for this slot.
    Measuring,
    /// Last suite completed; holds the formatted report line.
    Done(String),
    /// Last suite aborted; holds the failure description.
    Failed(String),
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::NotMeasured => f.write_str("not measured yet"),
            RunStatus::Measuring => f.write_str("measuring..."),
            RunStatus::Done(line) => f.write_str(line),
            RunStatus::Failed(message) => write!(f, "measurement failed: {message}"),
        }
    }
}

type StatusMap = IndexMap<(RunnerKey, BenchCase), RunStatus, FxBuildHasher>;

/// Benchmark orchestrator.
///
/// `Sync` and shareable: the busy flag is atomic and the status registry
/// sits behind a mutex, so a harness can be handed to UI wiring via
/// `Arc` without further locking discipline.
pub struct Harness {
    busy: AtomicBool,
    flip_order: AtomicBool,
    statuses: Mutex<StatusMap>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Create a harness with every status slot at "not measured yet".
    pub fn new() -> Self {
        let mut statuses = StatusMap::default();
        for key in RunnerKey::ALL {
            for case in BenchCase::ALL {
                statuses.insert((key, case), RunStatus::NotMeasured);
            }
        }
        Self {
            busy: AtomicBool::new(false),
            flip_order: AtomicBool::new(false),
            statuses: Mutex::new(statuses),
        }
    }

    /// Run one suite for `key` under `case`.
    ///
    /// Returns `Ok(None)` when another run is already in flight: the
    /// request is rejected, not queued. Errors during the measured loop
    /// propagate after being logged and recorded in the status registry.
    pub fn run(
        &self,
        key: RunnerKey,
        case: BenchCase,
        config: RunConfig,
    ) -> Result<Option<RunReport>, HarnessError> {
        self.run_with(key.runner().as_ref(), key, case, config)
    }

    /// Like [`Harness::run`] but with a caller-supplied adapter, so
    /// instrumented runners can drive the exact same orchestration path.
    pub fn run_with(
        &self,
        runner: &dyn Runner,
        key: RunnerKey,
        case: BenchCase,
        config: RunConfig,
    ) -> Result<Option<RunReport>, HarnessError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!(runner = key.label(), case = case.label(), "already busy, run rejected");
            return Ok(None);
        };
        let config = config.sanitized();
        self.set_status(key, case, RunStatus::Measuring);
        match self.suite(runner, key, case, &config, None) {
            Ok(report) => {
                self.set_status(key, case, RunStatus::Done(report.format_line(case, &config)));
                Ok(Some(report))
            }
            Err(err) => {
                tracing::error!(runner = key.label(), case = case.label(), error = %err, "run aborted");
                self.set_status(key, case, RunStatus::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Run both adapters sequentially over the given cases, against
    /// literally identical initial items.
    ///
    /// Which adapter goes first flips on every batch invocation so
    /// neither renderer systematically benefits from cache or JIT warmup
    /// when batches are compared over many manual runs. Returns
    /// `Ok(None)` when another run is already in flight.
    pub fn run_batch(
        &self,
        cases: &[BenchCase],
        config: RunConfig,
    ) -> Result<Option<Vec<(RunnerKey, BenchCase, RunReport)>>, HarnessError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("already busy, batch rejected");
            return Ok(None);
        };
        let config = config.sanitized();
        let base_seed = config.base_seed();
        let shared = create_items(config.count, base_seed);
        let mut results = Vec::with_capacity(RunnerKey::ALL.len() * cases.len());
        for key in self.next_runner_order() {
            let runner = key.runner();
            for &case in cases {
                self.set_status(key, case, RunStatus::Measuring);
                match self.suite(runner.as_ref(), key, case, &config, Some(&shared)) {
                    Ok(report) => {
                        self.set_status(
                            key,
                            case,
                            RunStatus::Done(report.format_line(case, &config)),
                        );
                        results.push((key, case, report));
                    }
                    Err(err) => {
                        tracing::error!(runner = key.label(), case = case.label(), error = %err, "batch aborted");
                        self.set_status(key, case, RunStatus::Failed(err.to_string()));
                        return Err(err);
                    }
                }
            }
        }
        Ok(Some(results))
    }

    /// Current status for one (runner, case) slot.
    pub fn status(&self, key: RunnerKey, case: BenchCase) -> RunStatus {
        self.statuses
            .lock()
            .get(&(key, case))
            .cloned()
            .unwrap_or(RunStatus::NotMeasured)
    }

    /// Every status slot, in registry order.
    pub fn statuses(&self) -> Vec<((RunnerKey, BenchCase), RunStatus)> {
        self.statuses
            .lock()
            .iter()
            .map(|(slot, status)| (*slot, status.clone()))
            .collect()
    }

    /// Return every status slot to "not measured yet".
    pub fn reset(&self) {
        for status in self.statuses.lock().values_mut() {
            *status = RunStatus::NotMeasured;
        }
    }

    fn set_status(&self, key: RunnerKey, case: BenchCase, status: RunStatus) {
        self.statuses.lock().insert((key, case), status);
    }

    fn next_runner_order(&self) -> [RunnerKey; 2] {
        if self.flip_order.fetch_xor(true, Ordering::Relaxed) {
            [RunnerKey::Diffed, RunnerKey::Reactive]
        } else {
            [RunnerKey::Reactive, RunnerKey::Diffed]
        }
    }

    /// One full suite: `runs` repetitions of mount → warmup → measured
    /// updates, with each repetition's teardown timed outside the next
    /// mount's window.
    fn suite(
        &self,
        runner: &dyn Runner,
        key: RunnerKey,
        case: BenchCase,
        config: &RunConfig,
        shared_items: Option<&[Item]>,
    ) -> Result<RunReport, HarnessError> {
        let _span =
            tracing::info_span!("suite", runner = key.label(), case = case.label()).entered();
        let base_seed = config.base_seed();
        let owned;
        let items: &[Item] = match shared_items {
            Some(shared) => shared,
            None => {
                owned = create_items(config.count, base_seed);
                &owned
            }
        };

        let mut mount_samples = Vec::with_capacity(config.runs);
        let mut update_samples = Vec::with_capacity(config.runs * config.updates);
        let mut cleanup_samples = Vec::with_capacity(config.runs);

        let mut previous: Option<Box<dyn RunnerHandle>> = None;
        for repetition in 0..config.runs {
            // The previous repetition is always torn down before the next
            // mount, and that teardown is timed separately so it never
            // bleeds into the mount window.
            if let Some(handle) = previous.take() {
                cleanup_samples.push(timed_cleanup(handle, key));
            }

            // Each repetition gets a distinct derived seed so repeated
            // runs are not identical replays, while the whole suite stays
            // a pure function of the base seed.
            let seed = base_seed.wrapping_add(repetition as u32);
            let mut mutator = Mutator::for_case(case, seed, config.mutate_count, items.len());

            let start = Instant::now();
            let mut handle = runner.mount(items)?;
            mount_samples.push(elapsed_ms(start));

            let mut current = items.to_vec();
            for _ in 0..config.warmup {
                current = mutator.apply(&current);
                handle.replace(&current)?;
            }
            for _ in 0..config.updates {
                current = mutator.apply(&current);
                let start = Instant::now();
                handle.replace(&current)?;
                update_samples.push(elapsed_ms(start));
            }
            previous = Some(handle);
        }

        // Tear down the final repetition too, so the cleanup sample set
        // has exactly `runs` entries.
        if let Some(handle) = previous.take() {
            cleanup_samples.push(timed_cleanup(handle, key));
        }

        Ok(RunReport {
            mount: summarize(&mount_samples),
            update: summarize(&update_samples),
            cleanup: summarize(&cleanup_samples),
        })
    }
}

/// Tear down a repetition's render root, returning the elapsed time.
///
/// Teardown failures never abort the sequence: a stale render root is
/// preferable to losing the measurement. Known-benign teardown errors
/// are suppressed without a log line; anything else is logged as a
/// warning.
fn timed_cleanup(mut handle: Box<dyn RunnerHandle>, key: RunnerKey) -> f64 {
    let start = Instant::now();
    if let Err(err) = handle.cleanup() {
        if !err.is_benign() {
            tracing::warn!(runner = key.label(), error = %err, "failed to cleanup previous run");
        }
    }
    elapsed_ms(start)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Releases the busy flag when dropped, including during unwinding.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
