use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use crate::combatant::Combatant;
use crate::life::{self, Health};
use crate::species::{growth, Species, SpeciesStats, MAX_LEVEL, TERRAIN_BOOST};
use crate::{Dice, EngineError, Terrain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(Uuid);

impl MonsterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MonsterId {
    fn default() -> Self {
        Self::new()
    }
}

/// Only built through `Monster::new`/`named` or a `MemberSpec`, so level and
/// health are always validated.
#[derive(Debug, Clone, Serialize)]
pub struct Monster {
    id: MonsterId,
    name: String,
    species: Species,
    level: u32,
    health: Health,
}

impl PartialEq for Monster {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Monster {}

fn scaled(base: u32, level: u32) -> u32 {
    (base as f64 * growth(level)).round() as u32
}

fn trace_log(msg: String) {
    trace!("{msg}");
}

impl Monster {
    /// A fresh monster at full health, named after its species.
    pub fn new(species: Species, level: u32) -> Result<Self, EngineError> {
        Self::named(species, species.stats().display_name, level)
    }

    pub fn named(species: Species, name: impl Into<String>, level: u32) -> Result<Self, EngineError> {
        if level == 0 {
            return Err(EngineError::InvalidLevel(level));
        }
        if level > MAX_LEVEL {
            return Err(EngineError::LevelTooHigh { level, max: MAX_LEVEL });
        }
        Ok(Self {
            id: MonsterId::new(),
            name: name.into(),
            species,
            level,
            health: Health::new(scaled(species.stats().base_health, level)),
        })
    }

    /// Set current health, clamped to the maximum.
    pub fn with_health(mut self, hp: u32) -> Self {
        self.health.hp = hp.min(self.health.max_hp);
        self
    }

    pub fn id(&self) -> MonsterId {
        self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn stats(&self) -> SpeciesStats {
        self.species.stats()
    }

    pub fn ideal_terrain(&self) -> Terrain {
        self.stats().ideal_terrain
    }

    pub fn buy_price(&self) -> u64 {
        let s = self.stats();
        let weighted = s.base_health + 4 * s.base_damage + 2 * s.base_speed + 5 * s.heal_rate;
        (weighted as f64 * growth(self.level)).round() as u64
    }

    pub fn should_level_up(&self, dice: &mut Dice) -> bool {
        dice.chance(self.stats().level_up_chance)
    }

    pub fn should_leave(&self, dice: &mut Dice) -> bool {
        dice.chance(self.stats().leave_chance)
    }

    /// No-op at `MAX_LEVEL`.
    pub fn level_up(&mut self) {
        if self.level >= MAX_LEVEL {
            return;
        }
        self.level += 1;
        let new_max = scaled(self.stats().base_health, self.level);
        life::raise_max(&self.name, &mut self.health, new_max, trace_log);
    }

    /// Overnight recovery.
    pub fn rest(&mut self) {
        let amount = scaled(self.stats().heal_rate, self.level);
        self.heal(amount);
    }
}

impl Combatant for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn health(&self) -> u32 {
        self.health.hp
    }

    fn max_health(&self) -> u32 {
        self.health.max_hp
    }

    fn speed(&self) -> u32 {
        self.stats().base_speed
    }

    fn scaled_damage(&self, terrain: Terrain) -> u32 {
        let s = self.stats();
        let boost = if terrain == s.ideal_terrain { TERRAIN_BOOST } else { 1.0 };
        (s.base_damage as f64 * growth(self.level) * boost).round() as u32
    }

    fn take_damage(&mut self, amount: u32) {
        life::apply_damage(&self.name, &mut self.health, amount, trace_log);
    }

    fn heal(&mut self, amount: u32) {
        life::heal(&self.name, &mut self.health, amount, trace_log);
    }

    fn sell_price(&self) -> u64 {
        self.buy_price() / 2
    }

    fn strike(&mut self, target: &mut Self, amount: u32) {
        let before = target.health();
        target.take_damage(amount);
        let drain = self.stats().drain_percent;
        if drain > 0 {
            let removed = before.saturating_sub(target.health()) as u64;
            let restored = (removed * drain as u64 / 100).min(u32::MAX as u64) as u32;
            self.heal(restored);
        }
    }
}
