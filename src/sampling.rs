//! Presentation-time sampling of generated candidates
//!
//! The engine always returns the full ranked list. A [`MatchSampler`] picks
//! the handful actually shown, optionally shuffling equally balanced
//! candidates so "regenerate" shows something new. Seeding the sampler makes
//! the selection reproducible.

use crate::engine::scoring::balance_tiers;
use crate::engine::MatchResult;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// First candidates of the ranked list
    #[default]
    Ranked,
    /// Shuffle within each tier of equal score difference
    ShuffleTies,
}

/// Selects the displayed subset of a ranked candidate list
#[derive(Debug, Clone, Default)]
pub struct MatchSampler {
    strategy: SamplingStrategy,
    seed: Option<u64>,
}

impl MatchSampler {
    pub fn new(strategy: SamplingStrategy, seed: Option<u64>) -> Self {
        Self { strategy, seed }
    }

    /// Deterministic ranked selection
    pub fn ranked() -> Self {
        Self::new(SamplingStrategy::Ranked, None)
    }

    pub fn shuffle_ties(seed: Option<u64>) -> Self {
        Self::new(SamplingStrategy::ShuffleTies, seed)
    }

    pub fn strategy(&self) -> SamplingStrategy {
        self.strategy
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Pick up to `count` candidates, keeping balance order across tiers
    pub fn sample<'a>(&self, candidates: &'a [MatchResult], count: usize) -> Vec<&'a MatchResult> {
        match self.strategy {
            SamplingStrategy::Ranked => candidates.iter().take(count).collect(),
            SamplingStrategy::ShuffleTies => {
                let mut rng = self.rng();
                let mut selected = Vec::with_capacity(count.min(candidates.len()));

                for tier in balance_tiers(candidates) {
                    let needed = count - selected.len();
                    if needed == 0 {
                        break;
                    }
                    if tier.len() <= needed {
                        let mut whole: Vec<&MatchResult> = tier.iter().collect();
                        whole.shuffle(&mut rng);
                        selected.extend(whole);
                    } else {
                        selected.extend(tier.choose_multiple(&mut rng, needed));
                    }
                }

                selected
            }
        }
    }
}
