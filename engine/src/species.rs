use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, Terrain};

/// Per-level multiplier: stats scale by `GROWTH_RATE^(level - 1)`.
pub const GROWTH_RATE: f64 = 1.1;
/// Damage multiplier on the monster's ideal terrain.
pub const TERRAIN_BOOST: f64 = 1.5;
/// Highest level a monster can reach; keeps every scaled stat well inside `u32`.
pub const MAX_LEVEL: u32 = 100;

pub fn growth(level: u32) -> f64 {
    GROWTH_RATE.powi(level.clamp(1, MAX_LEVEL) as i32 - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesStats {
    pub display_name: &'static str,
    pub base_health: u32,
    pub base_damage: u32,
    pub base_speed: u32,
    pub heal_rate: u32,
    pub ideal_terrain: Terrain,
    /// Percent chance per day to gain a level.
    pub level_up_chance: u32,
    /// Percent chance per day to walk away from the party.
    pub leave_chance: u32,
    /// Percent of damage dealt that the attacker recovers.
    pub drain_percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Emberpup,
    Tidecrawler,
    Thornback,
    Galewing,
    Burrowmole,
    Gloomfang,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Emberpup,
        Species::Tidecrawler,
        Species::Thornback,
        Species::Galewing,
        Species::Burrowmole,
        Species::Gloomfang,
    ];

    pub fn stats(self) -> SpeciesStats {
        match self {
            Species::Emberpup => SpeciesStats {
                display_name: "Emberpup",
                base_health: 40,
                base_damage: 12,
                base_speed: 30,
                heal_rate: 4,
                ideal_terrain: Terrain::Desert,
                level_up_chance: 30,
                leave_chance: 5,
                drain_percent: 0,
            },
            Species::Tidecrawler => SpeciesStats {
                display_name: "Tidecrawler",
                base_health: 55,
                base_damage: 9,
                base_speed: 15,
                heal_rate: 6,
                ideal_terrain: Terrain::Lake,
                level_up_chance: 25,
                leave_chance: 3,
                drain_percent: 0,
            },
            Species::Thornback => SpeciesStats {
                display_name: "Thornback",
                base_health: 60,
                base_damage: 8,
                base_speed: 10,
                heal_rate: 8,
                ideal_terrain: Terrain::Forest,
                level_up_chance: 20,
                leave_chance: 2,
                drain_percent: 0,
            },
            Species::Galewing => SpeciesStats {
                display_name: "Galewing",
                base_health: 35,
                base_damage: 11,
                base_speed: 45,
                heal_rate: 3,
                ideal_terrain: Terrain::Mountain,
                level_up_chance: 35,
                leave_chance: 8,
                drain_percent: 0,
            },
            Species::Burrowmole => SpeciesStats {
                display_name: "Burrowmole",
                base_health: 70,
                base_damage: 7,
                base_speed: 8,
                heal_rate: 5,
                ideal_terrain: Terrain::Plains,
                level_up_chance: 20,
                leave_chance: 4,
                drain_percent: 0,
            },
            Species::Gloomfang => SpeciesStats {
                display_name: "Gloomfang",
                base_health: 38,
                base_damage: 10,
                base_speed: 35,
                heal_rate: 2,
                ideal_terrain: Terrain::Cave,
                level_up_chance: 25,
                leave_chance: 10,
                drain_percent: 25,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Emberpup => "emberpup",
            Species::Tidecrawler => "tidecrawler",
            Species::Thornback => "thornback",
            Species::Galewing => "galewing",
            Species::Burrowmole => "burrowmole",
            Species::Gloomfang => "gloomfang",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stats().display_name)
    }
}

impl FromStr for Species {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sp| sp.as_str() == wanted)
            .ok_or_else(|| EngineError::UnknownSpecies(s.to_string()))
    }
}
