//! Deterministic per-trial RNG.
//!
//! # Determinism strategy
//!
//! A batch of trials shares one root seed.  Trial `i` draws from its own
//! `SmallRng` seeded by:
//!
//!   seed = root_seed XOR (i * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive trial indices across the seed space.  Trials
//! never share RNG state, so running them on a thread pool produces the same
//! summaries as running them in order.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed for trial `trial` of a batch rooted at `root_seed`.
#[inline]
pub fn trial_seed(root_seed: u64, trial: u64) -> u64 {
    root_seed ^ trial.wrapping_mul(MIXING_CONSTANT)
}

/// The random stream owned by one simulation run.
///
/// Every stochastic draw of a trial (arrivals, cargo sizes, transfer times,
/// robot duty times) goes through this one stream, in tick order.
pub struct TrialRng(SmallRng);

impl TrialRng {
    pub fn new(seed: u64) -> Self {
        TrialRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for trial `trial` of a batch rooted at `root_seed`.
    pub fn for_trial(root_seed: u64, trial: u64) -> Self {
        Self::new(trial_seed(root_seed, trial))
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
