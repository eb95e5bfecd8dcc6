//! Effects domain: randomness for particle emission and camera shake.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EFFECTS_SEED: u64 = 0x9F01_D5E7;

/// Seeded so effect patterns are reproducible between runs.
#[derive(Resource)]
pub struct EffectsRng(pub ChaCha8Rng);

impl Default for EffectsRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(EFFECTS_SEED))
    }
}

impl EffectsRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
