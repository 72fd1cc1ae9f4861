//! Benchmark items and deterministic mutation strategies.
//!
//! Both renderer adapters are exercised against the same item collections:
//! [`create_items`] builds the initial rows, and the two mutation
//! strategies transform a collection into its successor one measured step
//! at a time. Every transformation is a pure function of the captured
//! generator state, so a (seed, call count) pair pins the exact sequence
//! of collections a run sees.

use crate::rng::Lcg;
use smartstring::alias::String as SmartString;

/// Exclusive upper bound for item values.
pub const VALUE_MODULO: u32 = 1000;
/// Step applied by the value-update strategy.
const VALUE_INCREMENT: u32 = 17;

/// One benchmark row.
///
/// `id` is the stable identity key: unique within a live collection, and
/// ids issued by the splice strategy are monotonically increasing and
/// never reused. `label` is derived from `id` and never mutated
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable identity key.
    pub id: u64,
    /// Display label, always `"Row {id+1}"`.
    pub label: SmartString,
    /// Bounded payload value in `[0, 1000)`.
    pub value: u32,
}

impl Item {
    /// Build an item with the label derived from its id.
    pub fn new(id: u64, value: u32) -> Self {
        Self {
            id,
            label: row_label(id),
            value,
        }
    }
}

fn row_label(id: u64) -> SmartString {
    format!("Row {}", id + 1).into()
}

/// Create `count` items with deterministic values drawn from `seed`.
pub fn create_items(count: usize, seed: u32) -> Vec<Item> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|index| Item::new(index as u64, rng.next_u32() % VALUE_MODULO))
        .collect()
}

/// Which mutation strategy a benchmark run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BenchCase {
    /// In-place value updates with stable structure.
    Update,
    /// Alternating single insert/remove structural edits.
    Splice,
}

impl BenchCase {
    /// All cases, in the order batches run them.
    pub const ALL: [BenchCase; 2] = [BenchCase::Update, BenchCase::Splice];

    /// Short label used in status lines and spans.
    pub fn label(self) -> &'static str {
        match self {
            BenchCase::Update => "update",
            BenchCase::Splice => "splice",
        }
    }
}

impl std::fmt::Display for BenchCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Value-update strategy: bumps `clamp(mutate_count, 1, n)` values per
/// invocation by `+17 mod 1000`, leaving ids and labels untouched.
///
/// The target index is re-drawn independently for every step, so one
/// invocation may touch the same row repeatedly and skip others. That
/// matches observed hot-key access patterns and the golden sequences
/// depend on it; do not dedupe the draws.
#[derive(Debug, Clone)]
pub struct ValueMutator {
    rng: Lcg,
    mutate_count: usize,
}

impl ValueMutator {
    /// Capture a generator seeded with `seed`.
    pub fn new(mutate_count: usize, seed: u32) -> Self {
        Self {
            rng: Lcg::new(seed),
            mutate_count,
        }
    }

    /// Produce the successor collection. The input is untouched.
    pub fn apply(&mut self, items: &[Item]) -> Vec<Item> {
        let mut out = items.to_vec();
        let n = items.len();
        if n == 0 {
            return out;
        }
        let steps = self.mutate_count.clamp(1, n);
        for _ in 0..steps {
            let idx = self.rng.next_index(n);
            let item = &mut out[idx];
            item.value = (item.value + VALUE_INCREMENT) % VALUE_MODULO;
        }
        out
    }
}

/// Splice strategy: exactly one structural change per invocation,
/// alternating strictly between insert and remove.
///
/// Inserted rows take monotonically increasing ids starting at the
/// configured offset, so identity is never reused within one strategy
/// instance's lifetime. An empty input always inserts, regardless of the
/// alternation state, and forces the next call to remove.
#[derive(Debug, Clone)]
pub struct SpliceMutator {
    rng: Lcg,
    next_id: u64,
    insert_next: bool,
}

impl SpliceMutator {
    /// Capture a generator seeded with `seed`; ids start at
    /// `initial_next_id`.
    pub fn new(seed: u32, initial_next_id: u64) -> Self {
        Self {
            rng: Lcg::new(seed),
            next_id: initial_next_id,
            insert_next: true,
        }
    }

    fn issue_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Produce the successor collection (length ±1). The input is
    /// untouched.
    pub fn apply(&mut self, items: &[Item]) -> Vec<Item> {
        let n = items.len();
        if n == 0 {
            let id = self.issue_id();
            self.insert_next = false;
            return vec![Item::new(id, self.rng.next_u32() % VALUE_MODULO)];
        }

        if self.insert_next {
            let id = self.issue_id();
            let idx = self.rng.next_index(n + 1);
            let value = self.rng.next_u32() % VALUE_MODULO;
            let mut out = Vec::with_capacity(n + 1);
            out.extend_from_slice(&items[..idx]);
            out.push(Item::new(id, value));
            out.extend_from_slice(&items[idx..]);
            self.insert_next = false;
            out
        } else {
            let idx = self.rng.next_index(n);
            let mut out = items.to_vec();
            out.remove(idx);
            self.insert_next = true;
            out
        }
    }
}

/// A case-selected mutation strategy with its captured generator state.
#[derive(Debug, Clone)]
pub enum Mutator {
    /// Value-update strategy.
    Value(ValueMutator),
    /// Insert/remove splice strategy.
    Splice(SpliceMutator),
}

impl Mutator {
    /// Build the strategy for `case`. The splice strategy starts issuing
    /// ids at the initial collection length so fresh rows never collide
    /// with mounted ones.
    pub fn for_case(case: BenchCase, seed: u32, mutate_count: usize, initial_len: usize) -> Self {
        match case {
            BenchCase::Update => Mutator::Value(ValueMutator::new(mutate_count, seed)),
            BenchCase::Splice => Mutator::Splice(SpliceMutator::new(seed, initial_len as u64)),
        }
    }

    /// Produce the successor collection.
    pub fn apply(&mut self, items: &[Item]) -> Vec<Item> {
        match self {
            Mutator::Value(m) => m.apply(items),
            Mutator::Splice(m) => m.apply(items),
        }
    }
}
