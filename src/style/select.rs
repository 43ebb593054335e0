//! Random, bounded-size selection of candidate units.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Number of units a rule with `percent` selects out of `n` candidates.
///
/// Zero candidates select nothing; otherwise at least one unit is selected,
/// even at 0%.
pub fn selection_size(n: usize, percent: u8) -> usize {
    if n == 0 {
        return 0;
    }
    let percent = usize::from(percent.min(100));
    (n * percent / 100).max(1).min(n)
}

/// Draws subsets of candidates from an injected random source.
#[derive(Debug, Clone)]
pub struct Selector<R: Rng = StdRng> {
    rng: R,
}

impl Selector<StdRng> {
    /// Create a reproducible selector from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Create a selector seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Selector<R> {
    /// Create a selector over the given random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Choose `selection_size(candidates.len(), percent)` distinct
    /// candidates uniformly at random without replacement.
    pub fn select(&mut self, candidates: &[usize], percent: u8) -> BTreeSet<usize> {
        let count = selection_size(candidates.len(), percent);
        if count == 0 {
            return BTreeSet::new();
        }
        rand::seq::index::sample(&mut self.rng, candidates.len(), count)
            .into_iter()
            .map(|i| candidates[i])
            .collect()
    }
}
