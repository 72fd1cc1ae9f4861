//! Deterministic pseudo-random sequence generation.
//!
//! The benchmark drives two independent renderer adapters with "the same"
//! randomness, so the generator must be bit-for-bit reproducible: two
//! generators constructed with the same seed and advanced the same number
//! of times produce identical output forever. A linear congruential
//! generator with the Numerical Recipes constants is enough for that, and
//! its tiny state makes per-run seed derivation trivial.

/// LCG multiplier (Numerical Recipes).
const LCG_MULTIPLIER: u32 = 1_664_525;
/// LCG increment (Numerical Recipes).
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Deterministic 32-bit linear congruential generator.
///
/// The state is a single `u32` advanced by
/// `state * 1664525 + 1013904223 (mod 2^32)`. A seed of 0 is coerced to 1
/// so the stream never degenerates.
///
/// # Example
///
/// ```
/// use rowbench::rng::Lcg;
///
/// let mut a = Lcg::new(42);
/// let mut b = Lcg::new(42);
/// assert_eq!(a.next_u32(), b.next_u32());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from a 32-bit seed. Zero is coerced to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Advance the state and return it.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Draw an index below `len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero; callers draw indices only from non-empty
    /// collections.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot draw an index from an empty range");
        self.next_u32() as usize % len
    }
}
