//! Run configuration and base-seed derivation.

/// Lower bound for the mounted row count.
pub const MIN_COUNT: usize = 100;
/// Upper bound for repeated runs per suite.
pub const MAX_RUNS: usize = 10;
/// Upper bound for measured updates per run.
pub const MAX_UPDATES: usize = 100;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Configuration for one orchestrated benchmark run.
///
/// Immutable for the duration of a run. Out-of-range values are clamped
/// by [`RunConfig::sanitized`] rather than rejected; the harness is a
/// developer tool and coerces rather than validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of rows to mount (≥ 100).
    pub count: usize,
    /// Repeated mount/measure/teardown cycles (1–10).
    pub runs: usize,
    /// Measured update cycles per run (1–100).
    pub updates: usize,
    /// Value-update steps per mutation (1–count).
    pub mutate_count: usize,
    /// Explicit base seed; derived from the configuration when `None`.
    pub seed: Option<u32>,
    /// Discarded warm-up cycles before the measured updates.
    pub warmup: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            count: 1200,
            runs: 3,
            updates: 20,
            mutate_count: 50,
            seed: None,
            warmup: 1,
        }
    }
}

impl RunConfig {
    /// Clamp every field to its documented bounds.
    pub fn sanitized(&self) -> Self {
        let count = self.count.max(MIN_COUNT);
        Self {
            count,
            runs: self.runs.clamp(1, MAX_RUNS),
            updates: self.updates.clamp(1, MAX_UPDATES),
            mutate_count: self.mutate_count.clamp(1, count),
            seed: self.seed,
            warmup: self.warmup,
        }
    }

    /// The seed every generator in a run derives from.
    ///
    /// With no explicit seed, an FNV-1a fold of the numeric fields makes
    /// repeated runs with the same configuration reproducible without any
    /// manual seed bookkeeping. The derived value is coerced non-zero.
    pub fn base_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| self.derive_seed())
    }

    fn derive_seed(&self) -> u32 {
        let mut hash = FNV_OFFSET_BASIS;
        for field in [self.count, self.runs, self.updates, self.mutate_count] {
            hash = (hash ^ field as u32).wrapping_mul(FNV_PRIME);
        }
        if hash == 0 {
            1
        } else {
            hash
        }
    }
}
