#![allow(clippy::unwrap_used)]
//! Property-based tests for the benchmark engine.
//!
//! Uses proptest to pin the reproducibility guarantees: identical seeds
//! give identical streams, mutations preserve identity invariants, and
//! summaries ignore sample order.

use proptest::prelude::*;
use rowbench::data::{create_items, SpliceMutator, ValueMutator};
use rowbench::rng::Lcg;
use rowbench::stats::summarize;

// ============================================================================
// Generator Properties
// ============================================================================

proptest! {
    /// Two generators with the same seed produce identical streams for
    /// any call count.
    #[test]
    fn generator_streams_are_reproducible(seed in 1u32.., len in 0usize..2000) {
        let mut a = Lcg::new(seed);
        let mut b = Lcg::new(seed);
        let left: Vec<u32> = (0..len).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..len).map(|_| b.next_u32()).collect();
        prop_assert_eq!(left, right);
    }

    /// Seed zero behaves exactly like seed one.
    #[test]
    fn zero_seed_aliases_seed_one(len in 1usize..500) {
        let mut zero = Lcg::new(0);
        let mut one = Lcg::new(1);
        for _ in 0..len {
            prop_assert_eq!(zero.next_u32(), one.next_u32());
        }
    }
}

// ============================================================================
// Mutation Strategy Properties
// ============================================================================

proptest! {
    /// The value mutator never changes length, ids, or labels.
    #[test]
    fn value_mutation_preserves_identity(
        count in 1usize..300,
        seed in any::<u32>(),
        mutate_count in 1usize..400,
        steps in 1usize..10,
    ) {
        let mut current = create_items(count, seed);
        let mut mutator = ValueMutator::new(mutate_count, seed);
        for _ in 0..steps {
            let next = mutator.apply(&current);
            prop_assert_eq!(next.len(), current.len());
            for (before, after) in current.iter().zip(&next) {
                prop_assert_eq!(before.id, after.id);
                prop_assert_eq!(&before.label, &after.label);
                prop_assert!(after.value < 1000);
            }
            current = next;
        }
    }

    /// Two value mutators with the same seed produce the same collections.
    #[test]
    fn value_mutation_is_deterministic(
        count in 1usize..200,
        seed in any::<u32>(),
        mutate_count in 1usize..100,
    ) {
        let items = create_items(count, seed);
        let mut a = ValueMutator::new(mutate_count, seed);
        let mut b = ValueMutator::new(mutate_count, seed);
        prop_assert_eq!(a.apply(&items), b.apply(&items));
    }

    /// Splices alternate ±1 strictly and never reuse an id.
    #[test]
    fn splice_alternation_and_id_monotonicity(
        count in 0usize..100,
        seed in any::<u32>(),
        calls in 1usize..60,
    ) {
        let items = create_items(count, seed);
        let mut mutator = SpliceMutator::new(seed, items.len() as u64);
        let mut current = items;
        let mut last_change: Option<isize> = None;
        let mut highest_issued: Option<u64> = None;

        for _ in 0..calls {
            let before_len = current.len() as isize;
            let before_ids: Vec<u64> = current.iter().map(|it| it.id).collect();
            current = mutator.apply(&current);
            let change = current.len() as isize - before_len;

            // Exactly one structural edit per call.
            prop_assert!(change == 1 || change == -1);
            // Never two inserts or two removes back to back, except the
            // forced insert when re-seeding from empty.
            if let Some(previous) = last_change {
                if previous == change {
                    prop_assert_eq!(change, 1);
                    prop_assert_eq!(before_len, 0);
                }
            }
            last_change = Some(change);

            // Live ids stay unique.
            let mut ids: Vec<u64> = current.iter().map(|it| it.id).collect();
            ids.sort_unstable();
            let unique = {
                let mut deduped = ids.clone();
                deduped.dedup();
                deduped.len()
            };
            prop_assert_eq!(ids.len(), unique);

            // Issued ids strictly increase across the mutator's lifetime.
            if change == 1 {
                let new_id = current
                    .iter()
                    .map(|it| it.id)
                    .find(|id| !before_ids.contains(id))
                    .unwrap();
                if let Some(highest) = highest_issued {
                    prop_assert!(new_id > highest);
                }
                highest_issued = Some(new_id);
            }
        }
    }

    /// Splicing an empty collection always inserts.
    #[test]
    fn splice_from_empty_inserts(seed in any::<u32>(), offset in 0u64..1000) {
        let mut mutator = SpliceMutator::new(seed, offset);
        let out = mutator.apply(&[]);
        prop_assert_eq!(out.len(), 1);
        prop_assert_eq!(out[0].id, offset);
    }
}

// ============================================================================
// Statistics Properties
// ============================================================================

proptest! {
    /// Sample order never affects the summary, bit for bit.
    #[test]
    fn summaries_ignore_sample_order(samples in prop::collection::vec(0.0f64..10_000.0, 0..200)) {
        let mut reversed = samples.clone();
        reversed.reverse();
        let mut sorted = samples.clone();
        sorted.sort_by(f64::total_cmp);
        let summary = summarize(&samples);
        prop_assert_eq!(summary, summarize(&reversed));
        prop_assert_eq!(summary, summarize(&sorted));
    }

    /// A single-sample summary collapses onto the sample.
    #[test]
    fn single_sample_summary(sample in 0.0f64..10_000.0) {
        let summary = summarize(&[sample]);
        prop_assert_eq!(summary.count, 1);
        prop_assert_eq!(summary.average, sample);
        prop_assert_eq!(summary.median, sample);
        prop_assert_eq!(summary.p90, sample);
        prop_assert_eq!(summary.p95, sample);
        prop_assert_eq!(summary.min, sample);
        prop_assert_eq!(summary.max, sample);
        prop_assert_eq!(summary.stddev, 0.0);
    }

    /// Aggregates are ordered and bounded by the extremes.
    #[test]
    fn summary_ordering_invariants(samples in prop::collection::vec(0.0f64..10_000.0, 1..200)) {
        let summary = summarize(&samples);
        prop_assert!(summary.min <= summary.median);
        prop_assert!(summary.median <= summary.p90);
        prop_assert!(summary.p90 <= summary.p95);
        prop_assert!(summary.p95 <= summary.max);
        prop_assert!(summary.min <= summary.average && summary.average <= summary.max);
        prop_assert!(summary.stddev >= 0.0);
    }
}
