use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod battle;
pub mod combatant;
pub mod content;
pub mod error;
pub mod life;
pub mod monster;
pub mod roster;
pub mod species;
pub mod terrain;

pub use battle::{Battle, BattleEvent, BattleObserver, EventRecorder, LungeConfig, Rewards, Side};
pub use combatant::Combatant;
pub use error::EngineError;
pub use monster::{Monster, MonsterId};
pub use roster::{Roster, MAX_ROSTER_SIZE};
pub use species::{Species, SpeciesStats, MAX_LEVEL};
pub use terrain::Terrain;

enum Source {
    Seeded(ChaCha8Rng),
    Scripted { values: Vec<u32>, next: usize },
}

/// Injectable random source. Every roll the engine makes goes through one of these.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::from_entropy()) }
    }

    /// Replays `values` in order, wrapping around. Each value is clamped into
    /// whatever range it is drawn for.
    pub fn from_scripted(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "scripted dice need at least one value");
        Self { source: Source::Scripted { values, next: 0 } }
    }

    /// Uniform draw from the half-open `range`. Panics on an empty range.
    pub fn roll_range(&mut self, range: Range<u32>) -> u32 {
        assert!(range.start < range.end, "empty roll range {:?}", range);
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(range),
            Source::Scripted { values, next } => {
                let value = values[*next % values.len()];
                *next += 1;
                value.clamp(range.start, range.end - 1)
            }
        }
    }

    /// True with probability `percent`/100.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.roll_range(0..100) < percent
    }
}

/// Damage for one landed attack: uniform in `[scaled_max / 4, scaled_max)`.
pub fn roll_damage(dice: &mut Dice, scaled_max: u32) -> u32 {
    if scaled_max == 0 {
        return 0;
    }
    dice.roll_range(scaled_max / 4..scaled_max)
}
