//! Combat domain: deterministic randomness for hit rolls.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG for crit rolls, so replays with the same seed match.
#[derive(Resource, Debug, Clone)]
pub struct CombatRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl CombatRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn roll_crit(&mut self, chance: f32) -> bool {
        if chance <= 0.0 {
            return false;
        }
        self.rng.random::<f32>() < chance
    }
}

impl Default for CombatRng {
    fn default() -> Self {
        Self::new(0)
    }
}
