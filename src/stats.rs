//! Statistical summarization of duration samples.
//!
//! Summaries are recomputed fresh from a sample set, never updated
//! incrementally, and are bit-for-bit invariant under input permutation:
//! all aggregates are computed over the sorted data, so two runs that
//! collected the same samples in different orders report identical
//! numbers.

/// Summary statistics over a set of duration samples (milliseconds).
///
/// All fields are derived; an empty sample set yields the all-zero
/// summary rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatSummary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub average: f64,
    /// Nearest-rank 50th percentile.
    pub median: f64,
    /// Nearest-rank 90th percentile.
    pub p90: f64,
    /// Nearest-rank 95th percentile.
    pub p95: f64,
    /// Population standard deviation (divisor `count`, not `count - 1`).
    pub stddev: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

/// Summarize a set of duration samples.
///
/// Percentile `p` is the value at sorted index `round(p/100 * (count-1))`
/// clamped to the valid range: nearest-rank rounding, not linear
/// interpolation. Reports are compared across runs, so the exact rounding
/// rule is part of the contract.
pub fn summarize(samples: &[f64]) -> StatSummary {
    if samples.is_empty() {
        return StatSummary::default();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let average = sorted.iter().sum::<f64>() / count as f64;
    let variance = sorted
        .iter()
        .map(|value| (value - average).powi(2))
        .sum::<f64>()
        / count as f64;

    let percentile = |p: f64| -> f64 {
        let idx = ((p / 100.0) * (count - 1) as f64).round() as usize;
        sorted[idx.min(count - 1)]
    };

    StatSummary {
        count,
        average,
        median: percentile(50.0),
        p90: percentile(90.0),
        p95: percentile(95.0),
        stddev: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
    }
}
